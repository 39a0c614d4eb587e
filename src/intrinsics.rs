//! Pinhole intrinsics derived from a physical camera and sensor description.

use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, Result};

/// Which sensor dimension the field of view is fitted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorFit {
    Horizontal,
    Vertical,
    /// Fit whichever image axis is larger
    #[default]
    Auto,
}

/// Lens, sensor and output resolution of the capture camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub lens_mm: f64,
    pub sensor_width: f64,
    pub sensor_height: f64,
    pub sensor_fit: SensorFit,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    pub pixel_aspect_x: f64,
    pub pixel_aspect_y: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            lens_mm: 50.0,
            sensor_width: 36.0,
            sensor_height: 24.0,
            sensor_fit: SensorFit::Auto,
            resolution_x: 800,
            resolution_y: 800,
            resolution_percentage: 100,
            pixel_aspect_x: 1.0,
            pixel_aspect_y: 1.0,
        }
    }
}

impl CameraSettings {
    /// Horizontal field of view from the sensor width, in radians.
    pub fn angle_x(&self) -> f64 {
        2.0 * (self.sensor_width / (2.0 * self.lens_mm)).atan()
    }

    /// Vertical field of view from the sensor height, in radians.
    pub fn angle_y(&self) -> f64 {
        2.0 * (self.sensor_height / (2.0 * self.lens_mm)).atan()
    }

    /// Output size after the resolution percentage is applied.
    pub fn effective_resolution(&self) -> (f64, f64) {
        let scale = f64::from(self.resolution_percentage) / 100.0;
        (
            f64::from(self.resolution_x) * scale,
            f64::from(self.resolution_y) * scale,
        )
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("lens_mm", self.lens_mm),
            ("sensor_width", self.sensor_width),
            ("sensor_height", self.sensor_height),
            ("pixel_aspect_x", self.pixel_aspect_x),
            ("pixel_aspect_y", self.pixel_aspect_y),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(CaptureError::InvalidConfig(format!(
                "camera.{name} must be positive, got {value}"
            )));
        }

        let (w, h) = self.effective_resolution();
        if w < 1.0 || h < 1.0 {
            return Err(CaptureError::InvalidConfig(format!(
                "effective resolution {w}x{h} is smaller than one pixel"
            )));
        }

        Ok(())
    }
}

/// Pinhole camera model as written to the dataset manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicsModel {
    pub camera_angle_x: f64,
    pub camera_angle_y: f64,
    pub fl_x: f64,
    pub fl_y: f64,
    pub k1: f64,
    pub k2: f64,
    pub p1: f64,
    pub p2: f64,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aabb_scale: Option<u32>,
}

impl IntrinsicsModel {
    /// Maps the physical camera onto pixel-space focal lengths and principal point.
    ///
    /// Render resolution and sensor aspect are independent, so the sensor fit
    /// decides which image axis the sensor size is measured along.
    pub fn from_camera(camera: &CameraSettings) -> Self {
        let (width, height) = camera.effective_resolution();
        let pixel_aspect_ratio = camera.pixel_aspect_y / camera.pixel_aspect_x;

        let sensor_size_mm = match camera.sensor_fit {
            SensorFit::Vertical => camera.sensor_height,
            SensorFit::Horizontal | SensorFit::Auto => camera.sensor_width,
        };

        let fit = match camera.sensor_fit {
            SensorFit::Auto => {
                let size_x = camera.pixel_aspect_x * width;
                let size_y = camera.pixel_aspect_y * height;
                if size_x >= size_y {
                    SensorFit::Horizontal
                } else {
                    SensorFit::Vertical
                }
            }
            fit => fit,
        };

        let view_factor_px = match fit {
            SensorFit::Horizontal => width,
            _ => pixel_aspect_ratio * height,
        };
        let pixel_size_mm = sensor_size_mm / camera.lens_mm / view_factor_px;

        let fl_x = 1.0 / pixel_size_mm;
        let fl_y = fl_x / pixel_aspect_ratio;

        Self {
            camera_angle_x: camera.angle_x(),
            camera_angle_y: camera.angle_y(),
            fl_x,
            fl_y,
            k1: 0.0,
            k2: 0.0,
            p1: 0.0,
            p2: 0.0,
            cx: width / 2.0,
            cy: height / 2.0,
            w: width,
            h: height,
            aabb_scale: None,
        }
    }

    /// Attach the scene-scale hint used by compositing datasets.
    pub fn with_aabb_scale(mut self, scale: u32) -> Self {
        self.aabb_scale = Some(scale);
        self
    }

    /// Integer image size used by raster backends.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.w.round().max(1.0) as u32, self.h.round().max(1.0) as u32)
    }
}
