use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, Rgba32FImage, RgbaImage};

use super::{Environment, OutputFormat, RenderBackend, Stage, ViewTransform};
use crate::core::{intersect_triangle, BVHNode};
use crate::error::{CaptureError, Result};
use crate::intrinsics::IntrinsicsModel;
use crate::scene::Triangle;

/// Share of shading that does not depend on the headlight angle
const AMBIENT: f32 = 0.3;

/// Headless CPU ray caster.
///
/// Pixels are projected with the same pinhole model that goes into the
/// manifest, so the images agree with the recorded intrinsics.
pub struct RayCaster {
    triangles: Vec<Triangle>,
    bvh: BVHNode,
    environment: Environment,
    background_visible: bool,
    width: u32,
    height: u32,
    fl_x: f32,
    fl_y: f32,
    cx: f32,
    cy: f32,
    format: OutputFormat,
    view_transform: ViewTransform,
    camera_to_world: Mat4,
}

impl RayCaster {
    pub const NAME: &'static str = "raycast";

    /// Container format the ray caster encodes `format` with, if any.
    pub fn image_format(format: OutputFormat) -> Option<ImageFormat> {
        match format {
            OutputFormat::Bmp => Some(ImageFormat::Bmp),
            OutputFormat::Png => Some(ImageFormat::Png),
            OutputFormat::Jpeg => Some(ImageFormat::Jpeg),
            OutputFormat::Targa | OutputFormat::TargaRaw => Some(ImageFormat::Tga),
            OutputFormat::Tiff => Some(ImageFormat::Tiff),
            OutputFormat::Webp => Some(ImageFormat::WebP),
            OutputFormat::Hdr => Some(ImageFormat::Hdr),
            OutputFormat::OpenExr => Some(ImageFormat::OpenExr),
            _ => None,
        }
    }

    pub fn supports(format: OutputFormat) -> bool {
        Self::image_format(format).is_some()
    }

    pub fn new(
        stage: Stage,
        intrinsics: &IntrinsicsModel,
        format: OutputFormat,
        view_transform: ViewTransform,
    ) -> Result<Self> {
        if !Self::supports(format) {
            return Err(CaptureError::UnsupportedFormat {
                format,
                backend: Self::NAME,
            });
        }

        let bvh = BVHNode::build(&stage.triangles);
        let stats = bvh.stats();
        log::debug!(
            "BVH over {} triangles: {} nodes, {} leaves, depth {}",
            stats.total_primitives,
            stats.num_nodes,
            stats.num_leaves,
            stats.max_depth
        );

        let (width, height) = intrinsics.pixel_size();
        Ok(Self {
            triangles: stage.triangles,
            bvh,
            environment: stage.environment,
            background_visible: stage.background_visible,
            width,
            height,
            fl_x: intrinsics.fl_x as f32,
            fl_y: intrinsics.fl_y as f32,
            cx: intrinsics.cx as f32,
            cy: intrinsics.cy as f32,
            format,
            view_transform,
            camera_to_world: Mat4::IDENTITY,
        })
    }

    /// World-space ray through the center of pixel `(x, y)`, row 0 at the top
    pub fn primary_ray(&self, x: u32, y: u32) -> (Vec3, Vec3) {
        let local = Vec3::new(
            (x as f32 + 0.5 - self.cx) / self.fl_x,
            -(y as f32 + 0.5 - self.cy) / self.fl_y,
            -1.0,
        );
        let origin = self.camera_to_world.w_axis.truncate();
        let dir = self.camera_to_world.transform_vector3(local).normalize();
        (origin, dir)
    }

    /// Scene-linear RGBA seen through pixel `(x, y)`
    pub fn trace(&self, x: u32, y: u32) -> [f32; 4] {
        let (origin, dir) = self.primary_ray(x, y);
        let hit = self.bvh.closest_hit(origin, dir, |idx| {
            intersect_triangle(origin, dir, &self.triangles[idx as usize])
        });

        match hit {
            Some((idx, hit)) => {
                let normal = hit.facing_normal(dir);
                let albedo = self.triangles[idx as usize].color;
                let light = self.environment.sample(normal);
                let headlight = normal.dot(-dir).max(0.0);
                let shade = AMBIENT + (1.0 - AMBIENT) * headlight;
                [
                    albedo[0] * light[0] * shade,
                    albedo[1] * light[1] * shade,
                    albedo[2] * light[2] * shade,
                    1.0,
                ]
            }
            None if self.background_visible => {
                let [r, g, b] = self.environment.sample(dir);
                [r, g, b, 1.0]
            }
            None => [0.0; 4],
        }
    }

    fn write_display(&self, path: &Path, format: ImageFormat) -> Result<()> {
        let image: RgbaImage = ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, a] = self.trace(x, y);
            let display = self.view_transform.apply([r, g, b]);
            let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgba([to_u8(display[0]), to_u8(display[1]), to_u8(display[2]), to_u8(a)])
        });

        let written = match format {
            // no alpha channel in JPEG
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(image)
                .to_rgb8()
                .save_with_format(path, format),
            _ => image.save_with_format(path, format),
        };
        written.map_err(|source| CaptureError::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_linear(&self, path: &Path, format: ImageFormat) -> Result<()> {
        let image: Rgba32FImage =
            ImageBuffer::from_fn(self.width, self.height, |x, y| Rgba(self.trace(x, y)));

        let written = match format {
            // Radiance HDR has no alpha channel
            ImageFormat::Hdr => DynamicImage::ImageRgba32F(image)
                .to_rgb32f()
                .save_with_format(path, format),
            _ => image.save_with_format(path, format),
        };
        written.map_err(|source| CaptureError::Image {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl RenderBackend for RayCaster {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn set_camera(&mut self, camera_to_world: Mat4) {
        self.camera_to_world = camera_to_world;
    }

    fn camera_to_world(&self) -> Mat4 {
        self.camera_to_world
    }

    fn render(&mut self, target: &Path) -> Result<PathBuf> {
        let format = Self::image_format(self.format).ok_or(CaptureError::UnsupportedFormat {
            format: self.format,
            backend: Self::NAME,
        })?;
        let path = target.with_extension(self.format.extension());

        if self.format.is_float() {
            self.write_linear(&path, format)?;
        } else {
            self.write_display(&path, format)?;
        }

        log::debug!("Rendered {:?}", path);
        Ok(path)
    }
}
