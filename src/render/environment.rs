use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Equirectangular radiance map around a Z-up world.
#[derive(Debug, Clone)]
pub struct Environment {
    width: u32,
    height: u32,
    texels: Vec<[f32; 3]>,
}

impl Environment {
    /// Builds a map from row-major linear RGB texels.
    ///
    /// Falls back to black when `texels` does not match the size.
    pub fn equirect(width: u32, height: u32, texels: Vec<[f32; 3]>) -> Self {
        if width == 0 || height == 0 || texels.len() != (width * height) as usize {
            log::warn!(
                "Environment map of {}x{} has {} texels, using black",
                width,
                height,
                texels.len()
            );
            return Self::uniform([0.0; 3]);
        }
        Self {
            width,
            height,
            texels,
        }
    }

    /// Same radiance from every direction
    pub fn uniform(color: [f32; 3]) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Radiance arriving from `dir`. Nearest texel lookup.
    pub fn sample(&self, dir: Vec3) -> [f32; 3] {
        let dir = dir.normalize_or_zero();
        let u = 0.5 + dir.y.atan2(dir.x) / TAU;
        let v = dir.z.clamp(-1.0, 1.0).acos() / PI;

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.texels[(y * self.width + x) as usize]
    }
}
