use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use rand::Rng;

use super::rig::PivotRig;
use super::CameraPose;

/// Azimuth and pivot pitch for one uniform draw `(u, v)` in `[0, 1)`.
///
/// Pitch uses the inverse-CDF of the polar angle so views are spread
/// uniformly over surface area instead of bunching at the poles. The
/// hemisphere variant keeps `phi` in `[-pi/2, 0]`, above the horizon.
pub fn sample_angles(u: f32, v: f32, hemisphere: bool) -> (f32, f32) {
    let theta = TAU * u;
    let phi = if hemisphere {
        v.acos() - FRAC_PI_2
    } else {
        (1.0 - 2.0 * v).acos() - FRAC_PI_2
    };
    (theta, phi)
}

/// Random views on a sphere or upper hemisphere of fixed radius around the origin
#[derive(Debug, Clone)]
pub struct SphereSampler {
    rig: PivotRig,
    angles: Vec<(f32, f32)>,
}

impl SphereSampler {
    /// Draws every sample up front so the sequence is fixed once built.
    pub fn new<R: Rng>(views: usize, radius: f32, hemisphere: bool, rng: &mut R) -> Self {
        let angles = (0..views)
            .map(|_| {
                let u: f32 = rng.gen();
                let v: f32 = rng.gen();
                sample_angles(u, v, hemisphere)
            })
            .collect();

        Self {
            rig: PivotRig::new(Vec3::ZERO, Vec3::new(radius, 0.0, 0.0)),
            angles,
        }
    }

    pub fn pose(&self, index: usize) -> CameraPose {
        let (theta, phi) = self.angles[index];
        CameraPose {
            index,
            theta,
            phi,
            camera_to_world: self.rig.camera_to_world(theta, phi),
        }
    }
}
