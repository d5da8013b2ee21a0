//! Neutral (identity) Hald CLUT synthesis.

use haldcube_core::{HaldLevel, PixelBuffer, BYTES_PER_PIXEL};
use tracing::debug;

/// Lattice coordinates `(r, g, b)` of flat sample `index`.
///
/// Red varies fastest and blue slowest, which is both the generation order
/// of the neutral image and the `.cube` data order.
pub fn lattice_coords(level: HaldLevel, index: usize) -> (u32, u32, u32) {
    let size = level.cube_size() as usize;
    let r = index % size;
    let g = (index / size) % size;
    let b = index / (size * size);
    (r as u32, g as u32, b as u32)
}

/// Render the identity 3D LUT of `level` as a Hald image.
///
/// Counters run blue outermost, green, then red innermost; each step
/// writes the next pixel of the flat buffer. The result is a pure function
/// of `level`.
pub fn generate_neutral(level: HaldLevel) -> PixelBuffer {
    let start = std::time::Instant::now();
    let side = level.image_side();
    let size = level.cube_size();
    let bytes: Vec<u8> = (0..size).map(|k| level.channel_byte(k)).collect();

    let mut buffer = PixelBuffer::new(side, side);
    let mut pixels = buffer.as_bytes_mut().chunks_exact_mut(BYTES_PER_PIXEL);
    for b in 0..size as usize {
        for g in 0..size as usize {
            for r in 0..size as usize {
                if let Some(px) = pixels.next() {
                    px.copy_from_slice(&[bytes[r], bytes[g], bytes[b], 255]);
                }
            }
        }
    }

    debug!("generated neutral Hald {} in {:?}", level, start.elapsed());
    buffer
}

/// Neutral Hald at the default level (64³ samples, 512×512).
pub fn generate_neutral_default() -> PixelBuffer {
    generate_neutral(HaldLevel::DEFAULT)
}
