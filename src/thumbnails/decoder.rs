use super::types::{DecodeOptions, PixelFormat, PreviewImage};
use crate::binary::reader::read_u32;
use crate::blend::{ChunkHeader, ContainerHeader};
use crate::errors::{BlendThumbResult, ChunkError, PreviewError};
use crate::streams::ByteSource;
use log::debug;

/// Bytes taken by the width and height fields ahead of the pixels
const DIMENSIONS_SIZE: u32 = 8;
/// Pixel bytes pulled from the source per read
const READ_BLOCK_SIZE: usize = 64 * 1024;

/// Validated size information for a preview payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PreviewLayout {
    pub pixel_bytes: usize,
    pub row_stride: usize,
}

/// Check the declared payload length against the pixel dimensions.
///
/// Nothing may be allocated from `width` or `height` until this passes.
pub(crate) fn validate_layout(
    payload_length: u32,
    width: u32,
    height: u32,
) -> Result<PreviewLayout, ChunkError> {
    let bpp = PixelFormat::Rgba8.bytes_per_pixel() as u64;

    let declared = payload_length.checked_sub(DIMENSIONS_SIZE).ok_or_else(|| {
        ChunkError::new(format!(
            "payload of {} bytes cannot hold preview dimensions",
            payload_length
        ))
    })?;

    let pixel_bytes = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_mul(bpp))
        .ok_or_else(|| ChunkError::new(format!("preview {}x{} overflows", width, height)))?;

    if pixel_bytes != u64::from(declared) {
        return Err(ChunkError::new(format!(
            "preview {}x{} needs {} pixel bytes, chunk declares {}",
            width, height, pixel_bytes, declared
        )));
    }
    if pixel_bytes == 0 {
        return Err(ChunkError::new(format!("empty preview {}x{}", width, height)));
    }

    let pixel_bytes = usize::try_from(pixel_bytes)
        .map_err(|_| ChunkError::new("preview does not fit in memory"))?;
    let row_stride = usize::try_from(u64::from(width) * bpp)
        .map_err(|_| ChunkError::new("preview row does not fit in memory"))?;

    Ok(PreviewLayout {
        pixel_bytes,
        row_stride,
    })
}

/// Decode the preview chunk whose header was just read from `source`.
///
/// Rows are stored bottom to top. The buffer only grows as pixel data
/// actually arrives, so a chunk that declares more than the source holds
/// ends in truncation rather than a huge allocation. Rows are flipped in
/// place once complete.
pub(crate) fn decode_preview_chunk<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &ContainerHeader,
    chunk: &ChunkHeader,
    options: &DecodeOptions,
) -> BlendThumbResult<PreviewImage> {
    if !chunk.is_preview() {
        return Err(PreviewError::new(format!(
            "expected preview chunk, found {}",
            chunk.tag_name()
        ))
        .into());
    }

    let width = read_u32(source, header.byte_order)?;
    let height = read_u32(source, header.byte_order)?;
    let layout = validate_layout(chunk.payload_length, width, height)?;

    if let Some(max) = options.max_pixel_bytes {
        if layout.pixel_bytes > max {
            return Err(ChunkError::new(format!(
                "preview of {} bytes exceeds limit of {}",
                layout.pixel_bytes, max
            ))
            .into());
        }
    }

    debug!("Decoding {}x{} preview", width, height);

    let mut pixels = read_pixels(source, layout.pixel_bytes)?;
    flip_rows(&mut pixels, layout.row_stride);

    Ok(PreviewImage {
        width,
        height,
        format: PixelFormat::Rgba8,
        pixels,
    })
}

/// Read exactly `len` bytes, reserving capacity block by block.
fn read_pixels<S: ByteSource + ?Sized>(source: &mut S, len: usize) -> BlendThumbResult<Vec<u8>> {
    let mut pixels = Vec::new();
    let mut block = vec![0u8; len.min(READ_BLOCK_SIZE)];
    while pixels.len() < len {
        let want = (len - pixels.len()).min(block.len());
        source.read_exact(&mut block[..want])?;
        pixels.try_reserve(want).map_err(|e| {
            ChunkError::new(format!("cannot hold {} byte preview: {}", len, e))
        })?;
        pixels.extend_from_slice(&block[..want]);
    }
    Ok(pixels)
}

/// Reverse the row order of a packed image in place.
fn flip_rows(pixels: &mut [u8], row_stride: usize) {
    if row_stride == 0 {
        return;
    }
    let rows = pixels.len() / row_stride;
    for top in 0..rows / 2 {
        let bottom = rows - 1 - top;
        let (head, tail) = pixels.split_at_mut(bottom * row_stride);
        head[top * row_stride..(top + 1) * row_stride].swap_with_slice(&mut tail[..row_stride]);
    }
}
