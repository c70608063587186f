pub mod crop;
pub mod image_io;
pub mod sequence;
pub mod ser;
pub mod source;

pub use crop::{mirror_horizontal, CropBox};
pub use sequence::ImageSequence;
pub use ser::SerReader;
pub use source::{open_source, FrameSource};
