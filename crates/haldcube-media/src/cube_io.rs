//! `.cube` file output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use haldcube_color::CubeFile;
use haldcube_core::{HaldError, Result};
use tracing::info;

/// Write `cube` to `path`, replacing any existing file.
pub fn save_cube(cube: &CubeFile, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| HaldError::file_write(path, e))?;
    cube.write_to(BufWriter::new(file))
        .map_err(|e| HaldError::file_write(path, e))?;
    info!("LUT saved to {} ({} samples)", path.display(), cube.samples.len());
    Ok(())
}
