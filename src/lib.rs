//! Extraction of the preview thumbnail embedded in `.blend` scene files.
//!
//! Files may be stored raw or gzip-compressed; [`extract_local_preview`]
//! handles both. For in-memory data or custom streams implement
//! [`ByteSource`] and call [`decode_preview`].

pub mod binary;
pub use binary::ByteOrder;

pub mod blend;
pub use blend::{ChunkHeader, ContainerHeader, PointerWidth};

pub mod streams;
pub use streams::{open_byte_source, ByteSource, GzByteSource, LocalByteSource};

pub mod thumbnails;
pub use thumbnails::{
    decode_preview, decode_preview_with, extract_local_preview, read_local_preview, read_preview,
    read_preview_after_header, DecodeOptions, PixelFormat, PreviewImage,
};

pub mod errors;
pub use errors::{
    BlendThumbError, BlendThumbResult, ChunkError, ErrorKind, HeaderError, PreviewError,
    StreamError,
};
