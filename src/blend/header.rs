use crate::binary::ByteOrder;
use crate::errors::{BlendThumbResult, HeaderError};
use log::debug;
use serde::Serialize;
use std::io::Read;

/// Identifying magic at the start of every blend file
pub const BLEND_MAGIC: &[u8; 7] = b"BLENDER";
/// Size of the fixed file preamble in bytes
pub const FILE_HEADER_SIZE: usize = 12;
/// First file version that can carry an embedded preview chunk
pub const PREVIEW_MIN_VERSION: u16 = 250;

/// Width of native pointers in the authoring application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointerWidth {
    Four,
    Eight,
}

impl PointerWidth {
    pub fn bytes(self) -> usize {
        match self {
            PointerWidth::Four => 4,
            PointerWidth::Eight => 8,
        }
    }

    fn from_sentinel(b: u8) -> Option<Self> {
        match b {
            b'_' => Some(PointerWidth::Four),
            b'-' => Some(PointerWidth::Eight),
            _ => None,
        }
    }
}

/// Decoded blend file preamble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerHeader {
    pub pointer_width: PointerWidth,
    pub byte_order: ByteOrder,
    /// Three digit file version, e.g. 279 for "279". Absent when unparsable.
    pub version: Option<u16>,
}

impl ContainerHeader {
    /// Read and validate the 12-byte preamble from `r`.
    pub fn read<R: Read + ?Sized>(r: &mut R) -> BlendThumbResult<Self> {
        let mut buf = [0u8; FILE_HEADER_SIZE];
        r.read_exact(&mut buf)?;
        let header = Self::parse(&buf)?;
        debug!(
            "Blend header: {}-byte pointers, {:?} endian, version {:?}",
            header.pointer_width.bytes(),
            header.byte_order,
            header.version
        );
        Ok(header)
    }

    /// Validate an already buffered preamble.
    pub fn parse(buf: &[u8; FILE_HEADER_SIZE]) -> Result<Self, HeaderError> {
        if &buf[..7] != BLEND_MAGIC {
            return Err(HeaderError::new("missing BLENDER magic"));
        }

        let pointer_width = PointerWidth::from_sentinel(buf[7]).ok_or_else(|| {
            HeaderError::new(format!("unknown pointer size sentinel 0x{:02x}", buf[7]))
        })?;

        let byte_order = match buf[8] {
            b'V' => ByteOrder::Big,
            b'v' => ByteOrder::Little,
            other => {
                return Err(HeaderError::new(format!(
                    "unknown endian sentinel 0x{:02x}",
                    other
                )))
            }
        };

        Ok(ContainerHeader {
            pointer_width,
            byte_order,
            version: parse_version(&buf[9..12]),
        })
    }

    /// Size of every chunk header in this file: tag, length, old address,
    /// SDNA index and count.
    pub fn chunk_header_size(&self) -> usize {
        16 + self.pointer_width.bytes()
    }

    /// True when the version is known to predate embedded previews.
    pub fn predates_previews(&self) -> bool {
        matches!(self.version, Some(v) if v < PREVIEW_MIN_VERSION)
    }
}

fn parse_version(digits: &[u8]) -> Option<u16> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(
        digits
            .iter()
            .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0')),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::io::Cursor;

    fn header(bytes: &[u8; 12]) -> Result<ContainerHeader, HeaderError> {
        ContainerHeader::parse(bytes)
    }

    #[test]
    fn test_parse_64bit_little_endian() {
        let h = header(b"BLENDER-v279").unwrap();
        assert_eq!(h.pointer_width, PointerWidth::Eight);
        assert_eq!(h.byte_order, ByteOrder::Little);
        assert_eq!(h.version, Some(279));
        assert_eq!(h.chunk_header_size(), 24);
    }

    #[test]
    fn test_parse_32bit_big_endian() {
        let h = header(b"BLENDER_V249").unwrap();
        assert_eq!(h.pointer_width, PointerWidth::Four);
        assert_eq!(h.byte_order, ByteOrder::Big);
        assert_eq!(h.chunk_header_size(), 20);
        assert!(h.predates_previews());
    }

    #[test]
    fn test_bad_version_digits_are_not_fatal() {
        let h = header(b"BLENDER-vX9\0").unwrap();
        assert_eq!(h.version, None);
        assert!(!h.predates_previews());
    }

    #[test]
    fn test_rejects_wrong_magic() {
        assert!(header(b"BLENDEX-v279").is_err());
        assert!(header(b"\x89PNG\r\n\x1a\n\0\0\0\0").is_err());
    }

    #[test]
    fn test_rejects_unknown_sentinels() {
        assert!(header(b"BLENDER+v279").is_err());
        assert!(header(b"BLENDER-x279").is_err());
    }

    #[test]
    fn test_read_consumes_twelve_bytes() {
        let mut r = Cursor::new(b"BLENDER_v250REND".to_vec());
        ContainerHeader::read(&mut r).unwrap();
        assert_eq!(r.position(), 12);
    }

    #[test]
    fn test_short_input_is_truncation() {
        let mut r = Cursor::new(b"BLENDER".to_vec());
        let err = ContainerHeader::read(&mut r).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Truncated);
    }
}
