//! Capture configuration shared by every stage of the pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, Result};
use crate::intrinsics::CameraSettings;

/// Side length of the cube the object is fitted into
pub const DEFAULT_BOX_SIZE: f32 = 3.0;
pub const DEFAULT_AABB_SCALE: u32 = 16;
pub const DEFAULT_SPHERE_RADIUS: f32 = 7.0;
pub const DEFAULT_TRACK_HEIGHT: f32 = 2.0;
pub const DEFAULT_FIGURE_EIGHT_SCALE: f32 = 5.0;
pub const DEFAULT_FIGURE_EIGHT_OFFSET: f32 = 1e-2;
pub const MANIFEST_NAME: &str = "transforms.json";
pub const IMAGE_FOLDER_NAME: &str = "./images";

/// Immutable settings for a capture run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub box_size: f32,
    /// Scene-scale hint written by compositing datasets
    pub aabb_scale: u32,
    /// Orbit radius of the sphere, hemisphere and circular tracks
    pub sphere_radius: f32,
    /// Camera height of the circular and figure-eight tracks
    pub track_height: f32,
    pub figure_eight_scale: f32,
    pub figure_eight_offset: f32,
    /// Image directory, relative to the output directory
    pub image_folder: String,
    pub manifest_name: String,
    pub camera: CameraSettings,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            aabb_scale: DEFAULT_AABB_SCALE,
            sphere_radius: DEFAULT_SPHERE_RADIUS,
            track_height: DEFAULT_TRACK_HEIGHT,
            figure_eight_scale: DEFAULT_FIGURE_EIGHT_SCALE,
            figure_eight_offset: DEFAULT_FIGURE_EIGHT_OFFSET,
            image_folder: IMAGE_FOLDER_NAME.to_string(),
            manifest_name: MANIFEST_NAME.to_string(),
            camera: CameraSettings::default(),
        }
    }
}

impl CaptureConfig {
    /// Reads overrides from a JSON file on top of the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        log::debug!("Loaded capture config from {:?}: {:?}", path, config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("box_size", self.box_size),
            ("sphere_radius", self.sphere_radius),
            ("figure_eight_scale", self.figure_eight_scale),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(CaptureError::InvalidConfig(format!(
                "{name} must be positive, got {value}"
            )));
        }
        if !self.track_height.is_finite() || !self.figure_eight_offset.is_finite() {
            return Err(CaptureError::InvalidConfig(
                "track_height and figure_eight_offset must be finite".to_string(),
            ));
        }
        if self.image_folder.trim().is_empty() || self.manifest_name.trim().is_empty() {
            return Err(CaptureError::InvalidConfig(
                "image_folder and manifest_name must not be empty".to_string(),
            ));
        }
        self.camera.validate()
    }
}
