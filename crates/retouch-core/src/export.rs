use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::error::EditorError;
use crate::surface::RasterSurface;

/// Encode the surface contents as PNG.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>, EditorError> {
    let img = surface.pixels().to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(EditorError::Encode("nothing has been rendered".into()));
    }
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|err| EditorError::Encode(err.to_string()))?;
    debug!(size = bytes.len(), "encoded png");
    Ok(bytes)
}

/// Encode the surface as PNG and write it to `path`.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<()> {
    let bytes = encode_png(surface)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write image: {}", path.display()))?;
    info!(?path, size = bytes.len(), "image saved");
    Ok(())
}
