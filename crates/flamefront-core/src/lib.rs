pub mod annotations;
pub mod color;
pub mod consts;
pub mod detection;
pub mod error;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod postprocess;
pub mod worker;
