use anyhow::{Context, Result};
use std::path::Path;

use crate::render::Environment;

/// Loads an equirectangular environment map (HDR, EXR or any LDR raster).
pub fn load_environment(path: impl AsRef<Path>) -> Result<Environment> {
    let path = path.as_ref();
    log::info!("Loading environment map: {:?}", path);

    let image = image::open(path)
        .context(format!("Failed to load environment map: {:?}", path))?
        .into_rgb32f();

    log::debug!("Environment map is {}x{}", image.width(), image.height());

    Ok(Environment::equirect(
        image.width(),
        image.height(),
        image.pixels().map(|p| p.0).collect(),
    ))
}
