use std::f32::consts::TAU;

use glam::Vec3;

use super::CameraPose;
use crate::math::look_at;

/// Point on a Lemniscate of Gerono at parameter `theta`.
///
/// `offset` nudges x so the track never crosses the spot straight above the
/// target, where the look-at orientation is degenerate.
pub fn lemniscate(theta: f32, scale: f32, offset: f32, height: f32) -> Vec3 {
    Vec3::new(
        scale * theta.cos() + offset,
        scale * (2.0 * theta).sin(),
        height,
    )
}

/// Figure-eight track at fixed height, looking at the world origin.
///
/// The camera is placed directly rather than through a pivot.
#[derive(Debug, Clone)]
pub struct FigureEightSampler {
    step: f32,
    scale: f32,
    offset: f32,
    height: f32,
}

impl FigureEightSampler {
    pub fn new(views: usize, scale: f32, offset: f32, height: f32) -> Self {
        Self {
            step: TAU / views as f32,
            scale,
            offset,
            height,
        }
    }

    pub fn pose(&self, index: usize) -> CameraPose {
        let theta = self.step * index as f32;
        let eye = lemniscate(theta, self.scale, self.offset, self.height);
        CameraPose {
            index,
            theta,
            phi: 0.0,
            camera_to_world: look_at(eye, Vec3::ZERO),
        }
    }
}
