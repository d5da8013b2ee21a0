//! haldcube media: reading and writing Hald images and `.cube` files.

pub mod cube_io;
pub mod image_io;

pub use cube_io::save_cube;
pub use image_io::{encode_hald, load_hald, save_hald, HaldImageFormat};
