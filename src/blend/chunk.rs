use super::header::ContainerHeader;
use crate::binary::reader::{read_tag, read_u32, tag_to_string};
use crate::errors::BlendThumbResult;
use crate::streams::ByteSource;
use log::debug;

/// Render settings chunk, stored ahead of the preview
pub const SCENE_INFO_TAG: [u8; 4] = *b"REND";
/// Embedded preview image chunk
pub const PREVIEW_TAG: [u8; 4] = *b"TEST";

/// Old address (up to 8 bytes), SDNA index and count
const MAX_TRAILING_SIZE: usize = 16;

/// Chunk header information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Four-character code in file order
    pub tag: [u8; 4],
    /// Payload length, already in native order
    pub payload_length: u32,
}

impl ChunkHeader {
    /// Read one chunk header, leaving the source at the start of its payload.
    pub fn read<S: ByteSource + ?Sized>(
        source: &mut S,
        header: &ContainerHeader,
    ) -> BlendThumbResult<Self> {
        let tag = read_tag(source)?;
        let payload_length = read_u32(source, header.byte_order)?;

        // Old address, SDNA index and count follow; none matter here.
        let mut trailing = [0u8; MAX_TRAILING_SIZE];
        source.read_exact(&mut trailing[..header.pointer_width.bytes() + 8])?;

        Ok(ChunkHeader {
            tag,
            payload_length,
        })
    }

    pub fn is_scene_info(&self) -> bool {
        self.tag == SCENE_INFO_TAG
    }

    pub fn is_preview(&self) -> bool {
        self.tag == PREVIEW_TAG
    }

    pub fn tag_name(&self) -> String {
        tag_to_string(&self.tag)
    }
}

/// Skip past scene-info chunks and return the first other chunk header.
///
/// The source is left at the payload of the returned chunk. Whether that
/// chunk is actually a preview is for the caller to decide.
pub fn scan_to_candidate<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &ContainerHeader,
) -> BlendThumbResult<ChunkHeader> {
    let mut skipped = 0usize;
    loop {
        let chunk = ChunkHeader::read(source, header)?;
        if !chunk.is_scene_info() {
            debug!(
                "Stopped at chunk {} ({} bytes) after {} scene-info chunks",
                chunk.tag_name(),
                chunk.payload_length,
                skipped
            );
            return Ok(chunk);
        }
        source.skip(u64::from(chunk.payload_length))?;
        skipped += 1;
    }
}
