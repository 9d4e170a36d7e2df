pub mod chunk;
pub mod header;

pub use chunk::{scan_to_candidate, ChunkHeader, PREVIEW_TAG, SCENE_INFO_TAG};
pub use header::{ContainerHeader, PointerWidth, BLEND_MAGIC, PREVIEW_MIN_VERSION};
