/*
# Binary Reader Module

 Byte-order-aware readers for the fixed-width fields found in blend files.
 Numeric fields follow the byte order declared by the file header, while
 four-character chunk tags are always kept in file order.

 Key components:
 - `ByteOrder`: declared order of multi-byte numeric fields
 - `read_u32()`: 32-bit unsigned read normalised to native order
 - `read_tag()`: raw 4-byte tag read
*/

use serde::Serialize;
use std::io::{self, Read};

/// Order in which a file stores its multi-byte numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// Decode four bytes written in this order.
    pub fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        }
    }
}

/// Read a 32-bit value stored in `order` from `r`.
pub fn read_u32<R: Read + ?Sized>(r: &mut R, order: ByteOrder) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(order.u32_from_bytes(buf))
}

/// Read a four-character tag exactly as it appears in the file.
pub fn read_tag<R: Read + ?Sized>(r: &mut R) -> io::Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Render a tag for log output, replacing non-printable bytes.
pub fn tag_to_string(tag: &[u8; 4]) -> String {
    tag.iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
