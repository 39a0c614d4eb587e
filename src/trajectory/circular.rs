use std::f32::consts::TAU;

use glam::Vec3;

use super::rig::PivotRig;
use super::CameraPose;

/// Evenly spaced views on a horizontal circle, no randomness
#[derive(Debug, Clone)]
pub struct CircularSampler {
    rig: PivotRig,
    step: f32,
}

impl CircularSampler {
    pub fn new(views: usize, radius: f32, height: f32) -> Self {
        Self {
            rig: PivotRig::new(Vec3::ZERO, Vec3::new(radius, 0.0, height)),
            step: TAU / views as f32,
        }
    }

    pub fn pose(&self, index: usize) -> CameraPose {
        let theta = self.step * index as f32;
        CameraPose {
            index,
            theta,
            phi: 0.0,
            camera_to_world: self.rig.camera_to_world(theta, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pose_on_positive_x() {
        let pose = CircularSampler::new(8, 7.0, 2.0).pose(0);
        let eye = pose.camera_to_world.w_axis.truncate();
        assert!((eye - Vec3::new(7.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_height_is_constant() {
        let sampler = CircularSampler::new(12, 7.0, 2.0);
        for i in 0..12 {
            let eye = sampler.pose(i).camera_to_world.w_axis.truncate();
            assert!((eye.z - 2.0).abs() < 1e-5);
            assert!((eye.truncate().length() - 7.0).abs() < 1e-4);
        }
    }
}
