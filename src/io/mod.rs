//! I/O layer: the byte reader feeding the pipeline and the `writers` for
//! lossless PNG/TIFF output.
pub mod reader;
pub use reader::read_bytes;

pub mod writers;
