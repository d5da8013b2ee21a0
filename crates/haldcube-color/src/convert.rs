//! Hald image to `.cube` conversion.

use haldcube_core::{HaldError, HaldLevel, PixelBuffer, Result, BYTES_PER_PIXEL};
use tracing::debug;

use crate::cube::{validate_title, CubeFile, LutSample};

/// Read LUT samples from raw RGBA8 Hald bytes.
///
/// Pixels are scanned row-major (`y` outer, `x` inner); alpha is ignored.
/// Fails with `SizeMismatch` unless `rgba` holds exactly one pixel per
/// lattice sample.
pub fn samples_from_rgba(rgba: &[u8], level: HaldLevel) -> Result<Vec<LutSample>> {
    let expected = level.sample_count() * BYTES_PER_PIXEL;
    if rgba.len() != expected {
        return Err(HaldError::SizeMismatch {
            expected,
            got: rgba.len(),
        });
    }

    let side = level.image_side() as usize;
    let stride = side * BYTES_PER_PIXEL;
    let mut samples = Vec::with_capacity(level.sample_count());
    for y in 0..side {
        let row = &rgba[y * stride..(y + 1) * stride];
        for x in 0..side {
            let px = &row[x * BYTES_PER_PIXEL..(x + 1) * BYTES_PER_PIXEL];
            samples.push(LutSample::from_rgb8([px[0], px[1], px[2]]));
        }
    }
    Ok(samples)
}

/// Convert a decoded Hald image into a 3D LUT titled `title`.
///
/// The image must be exactly `L³ × L³` for `level`; anything else fails
/// with `InvalidDimensions` rather than being cropped or padded.
pub fn hald_to_cube(hald: &PixelBuffer, level: HaldLevel, title: &str) -> Result<CubeFile> {
    validate_title(title)?;

    let side = level.image_side();
    if hald.dimensions() != (side, side) {
        return Err(HaldError::InvalidDimensions {
            expected_w: side,
            expected_h: side,
            got_w: hald.width(),
            got_h: hald.height(),
        });
    }

    let start = std::time::Instant::now();
    let samples = samples_from_rgba(hald.as_bytes(), level)?;
    debug!("scanned {} samples in {:?}", samples.len(), start.elapsed());

    CubeFile::new(title, level.cube_size(), samples)
}

/// Convert a Hald image straight to `.cube` text.
pub fn convert_to_text(hald: &PixelBuffer, level: HaldLevel, title: &str) -> Result<String> {
    Ok(hald_to_cube(hald, level, title)?.to_cube_string())
}
