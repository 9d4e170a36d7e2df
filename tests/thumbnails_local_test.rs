use blendthumb::{
    extract_local_preview, open_byte_source, read_local_preview, read_preview_after_header,
    ByteSource, ContainerHeader, DecodeOptions, ErrorKind, PixelFormat,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::PathBuf;

/// 64-bit little-endian blend file: two scene-info chunks then a 3x2 preview.
fn sample_blend(top_down: &[u8]) -> Vec<u8> {
    fn chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
        out.extend_from_slice(tag);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 16]);
        out.extend_from_slice(payload);
    }

    let mut out = b"BLENDER-v293".to_vec();
    chunk(&mut out, b"REND", &[1u8; 72]);
    chunk(&mut out, b"REND", &[2u8; 72]);

    let mut preview = 3u32.to_le_bytes().to_vec();
    preview.extend_from_slice(&2u32.to_le_bytes());
    for row in top_down.chunks(12).rev() {
        preview.extend_from_slice(row);
    }
    chunk(&mut out, b"TEST", &preview);
    chunk(&mut out, b"GLOB", &[0u8; 8]);
    out
}

fn top_down_pixels() -> Vec<u8> {
    (0u8..24).map(|b| b.wrapping_mul(11)).collect()
}

fn write_temp(dir: &tempfile::TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, data).expect("write fixture");
    path
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::best());
    enc.write_all(data).expect("compress fixture");
    enc.finish().expect("finish gzip")
}

#[test]
fn test_extract_local_preview_raw() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "scene.blend", &sample_blend(&top_down_pixels()));

    let preview = extract_local_preview(&path);
    assert!(preview.is_some(), "preview missing from raw file");

    let preview = preview.unwrap();
    assert_eq!(preview.width, 3);
    assert_eq!(preview.height, 2);
    assert_eq!(preview.format, PixelFormat::Rgba8);
    assert_eq!(preview.pixels, top_down_pixels());
}

#[test]
fn test_extract_local_preview_gzip_matches_raw() {
    let dir = tempfile::tempdir().unwrap();
    let raw = sample_blend(&top_down_pixels());
    let raw_path = write_temp(&dir, "raw.blend", &raw);
    let gz_path = write_temp(&dir, "packed.blend", &gzip(&raw));

    let from_raw = extract_local_preview(&raw_path).unwrap();
    let from_gz = extract_local_preview(&gz_path).unwrap();
    assert_eq!(from_raw, from_gz);
}

#[test]
fn test_header_then_preview_from_one_gzip_source() {
    let dir = tempfile::tempdir().unwrap();
    let raw = sample_blend(&top_down_pixels());
    let path = write_temp(&dir, "packed.blend", &gzip(&raw));

    let mut source = open_byte_source(&path).expect("open fixture");
    assert!(source.is_compressed());
    let header = ContainerHeader::read(&mut source).expect("read header");
    assert_eq!(header.version, Some(293));

    let preview = read_preview_after_header(&mut source, &header, &DecodeOptions::default())
        .expect("preview after header");
    assert_eq!(preview.pixels, top_down_pixels());
}

#[test]
fn test_non_blend_file_has_no_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "notes.txt", b"just some text, not a scene");

    assert!(extract_local_preview(&path).is_none());
    let err = read_local_preview(&path, &DecodeOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatMismatch);
}

#[test]
fn test_truncated_gzip_file_has_no_preview() {
    let dir = tempfile::tempdir().unwrap();
    let raw = sample_blend(&top_down_pixels());
    let packed = gzip(&raw[..raw.len() - 40]);
    let path = write_temp(&dir, "cut.blend", &packed);

    assert!(extract_local_preview(&path).is_none());
}

#[test]
fn test_missing_file_has_no_preview() {
    let dir = tempfile::tempdir().unwrap();
    assert!(extract_local_preview(dir.path().join("absent.blend")).is_none());
}

#[test]
fn test_preview_encodes_to_png_data_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "scene.blend", &sample_blend(&top_down_pixels()));

    let preview = extract_local_preview(&path).unwrap();
    let url = preview.to_data_url().expect("encode png");
    assert!(
        url.starts_with("data:image/png;base64,"),
        "unexpected data url prefix"
    );
}
