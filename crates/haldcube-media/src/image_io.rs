//! Hald image decoding and encoding via the `image` crate.

use std::io::Cursor;
use std::path::Path;

use haldcube_core::{HaldError, HaldLevel, PixelBuffer, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, RgbaImage};
use tracing::{info, warn};

/// JPEG quality used for Hald output.
const JPEG_QUALITY: u8 = 100;

/// Raster format for Hald images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HaldImageFormat {
    /// Lossless; samples survive a save/load round trip exactly.
    #[default]
    Png,
    /// Lossy even at full quality; kept for compatibility with older tools.
    Jpeg,
}

impl HaldImageFormat {
    /// Infer the format from a file extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => Self::Jpeg,
            _ => Self::Png,
        }
    }

    /// Preferred file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    pub fn is_lossless(self) -> bool {
        matches!(self, Self::Png)
    }
}

/// Decode a Hald image and check it is `L³ × L³` for `level`.
///
/// RGB and RGBA sources are both accepted and returned as RGBA8. The image
/// is never resized or cropped.
pub fn load_hald(path: impl AsRef<Path>, level: HaldLevel) -> Result<PixelBuffer> {
    let path = path.as_ref();
    info!("Opening Hald image: {}", path.display());

    let decoded = ImageReader::open(path)
        .map_err(|e| HaldError::file_read(path, e))?
        .with_guessed_format()
        .map_err(|e| HaldError::file_read(path, e))?
        .decode()
        .map_err(|e| HaldError::file_read(path, e))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let side = level.image_side();
    if (width, height) != (side, side) {
        return Err(HaldError::InvalidDimensions {
            expected_w: side,
            expected_h: side,
            got_w: width,
            got_h: height,
        });
    }

    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Encode a pixel buffer in memory.
pub fn encode_hald(buffer: &PixelBuffer, format: HaldImageFormat) -> Result<Vec<u8>> {
    let (width, height) = buffer.dimensions();
    let mut out = Cursor::new(Vec::new());

    match format {
        HaldImageFormat::Png => PngEncoder::new(&mut out)
            .write_image(buffer.as_bytes(), width, height, ExtendedColorType::Rgba8)
            .map_err(|e| HaldError::Encode(e.to_string()))?,
        HaldImageFormat::Jpeg => {
            // JPEG carries no alpha channel.
            let rgba = RgbaImage::from_raw(width, height, buffer.as_bytes().to_vec())
                .ok_or_else(|| HaldError::Encode("buffer does not match its dimensions".into()))?;
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|e| HaldError::Encode(e.to_string()))?
        }
    }

    Ok(out.into_inner())
}

/// Encode `buffer` as `format` and write it to `path`.
pub fn save_hald(
    buffer: &PixelBuffer,
    path: impl AsRef<Path>,
    format: HaldImageFormat,
) -> Result<()> {
    let path = path.as_ref();
    if !format.is_lossless() {
        warn!(
            "{} is lossy; Hald samples may shift when reloaded",
            path.display()
        );
    }

    let start = std::time::Instant::now();
    let data = encode_hald(buffer, format)?;
    std::fs::write(path, data).map_err(|e| HaldError::file_write(path, e))?;
    info!(
        "Hald saved to {} ({:?}, {:?})",
        path.display(),
        format,
        start.elapsed()
    );
    Ok(())
}
