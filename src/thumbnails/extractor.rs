use super::decoder::decode_preview_chunk;
use super::types::{DecodeOptions, PreviewImage};
use crate::blend::{scan_to_candidate, ContainerHeader};
use crate::errors::{BlendThumbError, BlendThumbResult, PreviewError};
use crate::streams::{open_byte_source, ByteSource};
use log::{info, log, Level};
use std::fmt::Display;
use std::path::Path;

/// Decode the embedded preview of a blend file, or `None` when there is none.
///
/// Not a blend file, no preview, truncated and corrupt input all yield
/// `None`; the reason is logged.
pub fn decode_preview<S: ByteSource + ?Sized>(source: &mut S) -> Option<PreviewImage> {
    decode_preview_with(source, &DecodeOptions::default())
}

/// [`decode_preview`] with explicit options.
pub fn decode_preview_with<S: ByteSource + ?Sized>(
    source: &mut S,
    options: &DecodeOptions,
) -> Option<PreviewImage> {
    match read_preview(source, options) {
        Ok(image) => Some(image),
        Err(e) => {
            log_no_preview("stream", &e);
            None
        }
    }
}

/// Core preview extraction keeping the reason for failure.
pub fn read_preview<S: ByteSource + ?Sized>(
    source: &mut S,
    options: &DecodeOptions,
) -> BlendThumbResult<PreviewImage> {
    let header = ContainerHeader::read(source)?;
    read_preview_after_header(source, &header, options)
}

/// Continue extraction from a source whose file header was already read.
pub fn read_preview_after_header<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &ContainerHeader,
    options: &DecodeOptions,
) -> BlendThumbResult<PreviewImage> {
    if options.skip_legacy_versions && header.predates_previews() {
        return Err(PreviewError::new(format!(
            "file version {:?} predates embedded previews",
            header.version
        ))
        .into());
    }

    let chunk = scan_to_candidate(source, header)?;
    let image = decode_preview_chunk(source, header, &chunk, options)?;

    info!(
        "Decoded {}x{} preview from {} source",
        image.width,
        image.height,
        if source.is_compressed() { "gzip" } else { "raw" }
    );
    Ok(image)
}

/// Open a local blend file, raw or gzip-compressed, and read its preview.
pub fn read_local_preview<P: AsRef<Path>>(
    path: P,
    options: &DecodeOptions,
) -> BlendThumbResult<PreviewImage> {
    let mut source = open_byte_source(path)?;
    read_preview(&mut source, options)
}

/// Open a local blend file and decode its preview, or `None`.
pub fn extract_local_preview<P: AsRef<Path>>(path: P) -> Option<PreviewImage> {
    let path = path.as_ref();
    match read_local_preview(path, &DecodeOptions::default()) {
        Ok(image) => Some(image),
        Err(e) => {
            log_no_preview(path.display(), &e);
            None
        }
    }
}

/// Expected absences log at debug, damaged input at warn.
fn no_preview_level(err: &BlendThumbError) -> Level {
    match err {
        BlendThumbError::FormatMismatch(_) | BlendThumbError::NoPreview(_) => Level::Debug,
        _ => Level::Warn,
    }
}

fn no_preview_message(origin: impl Display, err: &BlendThumbError) -> String {
    format!("{}: no preview produced: {}", origin, err)
}

fn log_no_preview(origin: impl Display, err: &BlendThumbError) {
    log!(no_preview_level(err), "{}", no_preview_message(origin, err));
}
