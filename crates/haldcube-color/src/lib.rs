//! haldcube color: Hald CLUT synthesis and `.cube` transcoding.

pub mod convert;
pub mod cube;
pub mod hald;

pub use convert::{convert_to_text, hald_to_cube, samples_from_rgba};
pub use cube::{validate_title, CubeFile, LutSample, HEADER_LINES, MAX_SIZE};
pub use hald::{generate_neutral, generate_neutral_default, lattice_coords};
