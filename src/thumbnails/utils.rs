use super::types::PreviewImage;
use crate::errors::{BlendThumbError, BlendThumbResult};
use image::{ImageOutputFormat, RgbaImage};
use std::io;

impl PreviewImage {
    /// Wrap the pixels in an `image` buffer.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Encode the preview as PNG.
    pub fn to_png_bytes(&self) -> BlendThumbResult<Vec<u8>> {
        let image = self.to_rgba_image().ok_or_else(|| {
            BlendThumbError::Other(io::Error::new(
                io::ErrorKind::InvalidData,
                "pixel buffer does not match dimensions",
            ))
        })?;

        let mut buffer = Vec::new();
        let mut cursor = io::Cursor::new(&mut buffer);
        image
            .write_to(&mut cursor, ImageOutputFormat::Png)
            .map_err(|e| BlendThumbError::Other(io::Error::other(e)))?;
        Ok(buffer)
    }

    /// Encode the preview as a `data:image/png;base64,` URL.
    pub fn to_data_url(&self) -> BlendThumbResult<String> {
        use base64::{engine::general_purpose, Engine as _};

        let png = self.to_png_bytes()?;
        Ok(format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png)
        ))
    }
}
