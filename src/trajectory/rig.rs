use glam::{Mat4, Vec3};

use crate::math::look_at;

/// A camera rigidly attached to a rotating pivot.
///
/// The pivot sits at `pivot` and rotates by Euler angles applied as
/// `Rz(yaw) * Ry(pitch)`. The camera hangs at `offset` in pivot space and is
/// always re-aimed at the pivot's location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotRig {
    pub pivot: Vec3,
    pub offset: Vec3,
}

impl PivotRig {
    pub fn new(pivot: Vec3, offset: Vec3) -> Self {
        Self { pivot, offset }
    }

    pub fn pivot_matrix(&self, yaw: f32, pitch: f32) -> Mat4 {
        Mat4::from_translation(self.pivot)
            * Mat4::from_rotation_z(yaw)
            * Mat4::from_rotation_y(pitch)
    }

    /// Camera world position: pivot world transform times the local offset.
    pub fn camera_position(&self, yaw: f32, pitch: f32) -> Vec3 {
        (self.pivot_matrix(yaw, pitch) * Mat4::from_translation(self.offset))
            .w_axis
            .truncate()
    }

    pub fn camera_to_world(&self, yaw: f32, pitch: f32) -> Mat4 {
        look_at(self.camera_position(yaw, pitch), self.pivot)
    }
}
