mod decoder;
pub mod extractor;
mod types;
mod utils;

pub use extractor::{
    decode_preview, decode_preview_with, extract_local_preview, read_local_preview, read_preview,
    read_preview_after_header,
};
pub use types::{DecodeOptions, PixelFormat, PreviewImage};
