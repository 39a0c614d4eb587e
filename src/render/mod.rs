//! Render collaborators: the backend trait, output settings and built-in backends.

mod environment;
mod raycast;
mod tone;

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scene::{SceneObject, Triangle};

pub use environment::Environment;
pub use raycast::RayCaster;
pub use tone::ViewTransform;

/// Albedo of the ground plane added under composited objects
const GROUND_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// A renderer that owns the live camera.
///
/// Capture drives it strictly in sequence: place the camera, render, read
/// the camera back. Nothing else may touch it while a run is in progress.
pub trait RenderBackend {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    fn set_camera(&mut self, camera_to_world: Mat4);

    /// Camera transform as committed by the last render
    fn camera_to_world(&self) -> Mat4;

    /// Renders the current view to `target` plus the format's extension.
    /// Blocks until the file is written and returns its path.
    fn render(&mut self, target: &Path) -> Result<PathBuf>;
}

/// Image file formats selectable for a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    #[value(name = "BMP")]
    #[serde(rename = "BMP")]
    Bmp,
    #[value(name = "IRIS")]
    #[serde(rename = "IRIS")]
    Iris,
    #[default]
    #[value(name = "PNG")]
    #[serde(rename = "PNG")]
    Png,
    #[value(name = "JPEG")]
    #[serde(rename = "JPEG")]
    Jpeg,
    #[value(name = "JPEG2000")]
    #[serde(rename = "JPEG2000")]
    Jpeg2000,
    #[value(name = "TARGA")]
    #[serde(rename = "TARGA")]
    Targa,
    #[value(name = "TARGA_RAW")]
    #[serde(rename = "TARGA_RAW")]
    TargaRaw,
    #[value(name = "CINEON")]
    #[serde(rename = "CINEON")]
    Cineon,
    #[value(name = "DPX")]
    #[serde(rename = "DPX")]
    Dpx,
    #[value(name = "HDR")]
    #[serde(rename = "HDR")]
    Hdr,
    #[value(name = "OPEN_EXR_MULTILAYER")]
    #[serde(rename = "OPEN_EXR_MULTILAYER")]
    OpenExrMultilayer,
    #[value(name = "OPEN_EXR")]
    #[serde(rename = "OPEN_EXR")]
    OpenExr,
    #[value(name = "TIFF")]
    #[serde(rename = "TIFF")]
    Tiff,
    #[value(name = "WEBP")]
    #[serde(rename = "WEBP")]
    Webp,
    #[value(name = "AVI_JPEG")]
    #[serde(rename = "AVI_JPEG")]
    AviJpeg,
    #[value(name = "AVI_RAW")]
    #[serde(rename = "AVI_RAW")]
    AviRaw,
    #[value(name = "FFMPEG")]
    #[serde(rename = "FFMPEG")]
    Ffmpeg,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Bmp => "BMP",
            OutputFormat::Iris => "IRIS",
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Jpeg2000 => "JPEG2000",
            OutputFormat::Targa => "TARGA",
            OutputFormat::TargaRaw => "TARGA_RAW",
            OutputFormat::Cineon => "CINEON",
            OutputFormat::Dpx => "DPX",
            OutputFormat::Hdr => "HDR",
            OutputFormat::OpenExrMultilayer => "OPEN_EXR_MULTILAYER",
            OutputFormat::OpenExr => "OPEN_EXR",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Webp => "WEBP",
            OutputFormat::AviJpeg => "AVI_JPEG",
            OutputFormat::AviRaw => "AVI_RAW",
            OutputFormat::Ffmpeg => "FFMPEG",
        }
    }

    /// File extension conventionally used for the format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Bmp => "bmp",
            OutputFormat::Iris => "rgb",
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Jpeg2000 => "jp2",
            OutputFormat::Targa | OutputFormat::TargaRaw => "tga",
            OutputFormat::Cineon => "cin",
            OutputFormat::Dpx => "dpx",
            OutputFormat::Hdr => "hdr",
            OutputFormat::OpenExrMultilayer | OutputFormat::OpenExr => "exr",
            OutputFormat::Tiff => "tif",
            OutputFormat::Webp => "webp",
            OutputFormat::AviJpeg | OutputFormat::AviRaw => "avi",
            OutputFormat::Ffmpeg => "mp4",
        }
    }

    /// Float formats store scene-linear values and skip the view transform
    pub fn is_float(&self) -> bool {
        matches!(
            self,
            OutputFormat::Hdr | OutputFormat::OpenExr | OutputFormat::OpenExrMultilayer
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the renderer sees besides the camera.
#[derive(Debug, Clone)]
pub struct Stage {
    pub triangles: Vec<Triangle>,
    /// Lights the scene; also the backdrop when visible
    pub environment: Environment,
    /// When false the film is transparent where nothing is hit
    pub background_visible: bool,
}

impl Stage {
    /// Object-only stage: transparent film lit by a constant white world.
    pub fn foreground(object: &SceneObject) -> Self {
        Self {
            triangles: object.world_triangles(),
            environment: Environment::uniform([1.0, 1.0, 1.0]),
            background_visible: false,
        }
    }

    /// Object in front of a visible environment map.
    pub fn composite(object: &SceneObject, environment: Environment) -> Self {
        Self {
            triangles: object.world_triangles(),
            environment,
            background_visible: true,
        }
    }

    /// Square ground plane of side `size` centered under the origin at height `z`.
    pub fn add_ground_plane(&mut self, size: f32, z: f32) {
        let h = size * 0.5;
        let a = Vec3::new(-h, -h, z);
        let b = Vec3::new(h, -h, z);
        let c = Vec3::new(h, h, z);
        let d = Vec3::new(-h, h, z);
        self.triangles.push(Triangle::new(a, b, c, GROUND_COLOR));
        self.triangles.push(Triangle::new(a, c, d, GROUND_COLOR));
    }
}

/// Backend that tracks the camera but writes no images
#[derive(Debug, Default)]
pub struct PoseRecorder {
    camera_to_world: Mat4,
    rendered: Vec<PathBuf>,
}

impl PoseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets requested so far, in order
    pub fn rendered(&self) -> &[PathBuf] {
        &self.rendered
    }
}

impl RenderBackend for PoseRecorder {
    fn name(&self) -> &'static str {
        "pose-recorder"
    }

    fn set_camera(&mut self, camera_to_world: Mat4) {
        self.camera_to_world = camera_to_world;
    }

    fn camera_to_world(&self) -> Mat4 {
        self.camera_to_world
    }

    fn render(&mut self, target: &Path) -> Result<PathBuf> {
        self.rendered.push(target.to_path_buf());
        Ok(target.to_path_buf())
    }
}
