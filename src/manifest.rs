//! The dataset manifest written next to the rendered images.

use std::path::Path;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::intrinsics::IntrinsicsModel;
use crate::math::to_rows;

/// One rendered view: image path without extension plus camera-to-world pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub file_path: String,
    /// Row-major 4x4
    pub transform_matrix: [[f32; 4]; 4],
}

impl FrameRecord {
    pub fn new(image_folder: &str, index: usize, camera_to_world: &Mat4) -> Self {
        Self {
            file_path: format!("{}/{}", image_folder.trim_end_matches('/'), index),
            transform_matrix: to_rows(camera_to_world),
        }
    }

    pub fn camera_to_world(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.transform_matrix).transpose()
    }
}

/// Intrinsics flattened next to the ordered frame list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    #[serde(flatten)]
    pub intrinsics: IntrinsicsModel,
    pub frames: Vec<FrameRecord>,
}

impl DatasetManifest {
    pub fn new(intrinsics: IntrinsicsModel, frames: Vec<FrameRecord>) -> Self {
        Self { intrinsics, frames }
    }

    /// Pretty JSON with four-space indentation
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Wrote manifest with {} frames to {:?}", self.frames.len(), path);
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
