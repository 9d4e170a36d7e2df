pub mod byte_source;

pub use byte_source::{open_byte_source, ByteSource, GzByteSource, LocalByteSource};
