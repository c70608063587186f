mod batch;
mod preview;
mod progress;

pub use batch::{spawn_batch, BatchEvent, BatchHandle};
pub use preview::{PreviewRequest, PreviewResult, PreviewWorker};
pub use progress::ChannelProgressReporter;
