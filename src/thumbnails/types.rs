use serde::Serialize;

/// Pixel layout of a decoded preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PixelFormat {
    /// Four 8-bit channels per pixel, in R, G, B, A byte order
    Rgba8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Preview thumbnail decoded from a blend file, rows ordered top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    #[serde(skip)]
    pub pixels: Vec<u8>,
}

impl PreviewImage {
    /// Number of bytes in one row of pixels.
    pub fn row_stride(&self) -> usize {
        self.pixels.len() / self.height.max(1) as usize
    }

    /// Bytes of row `y`, counted from the top.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let stride = self.row_stride();
        let start = (y as usize).checked_mul(stride)?;
        self.pixels.get(start..start.checked_add(stride)?)
    }
}

/// Tuning knobs for preview decoding
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Give up early on files whose version predates embedded previews.
    pub skip_legacy_versions: bool,
    /// Reject previews whose pixel buffer would exceed this many bytes.
    pub max_pixel_bytes: Option<usize>,
}
