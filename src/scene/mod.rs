//! In-memory scene objects: triangle meshes with a persistent world transform.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec3};

use crate::core::bvh::BVHPrimitive;
use crate::math::AABB;

/// Single mesh triangle with a flat albedo
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub color: [f32; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, color: [f32; 3]) -> Self {
        Self { v0, v1, v2, color }
    }

    pub fn transformed(&self, m: &Mat4) -> Self {
        Self {
            v0: m.transform_point3(self.v0),
            v1: m.transform_point3(self.v1),
            v2: m.transform_point3(self.v2),
            color: self.color,
        }
    }
}

impl BVHPrimitive for Triangle {
    fn bounds(&self) -> AABB {
        AABB::new(
            self.v0.min(self.v1).min(self.v2),
            self.v0.max(self.v1).max(self.v2),
        )
    }
}

/// Up-axis convention of imported mesh data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpAxis {
    /// glTF / OBJ convention
    Y,
    Z,
}

impl UpAxis {
    /// Rotation taking this convention into the Z-up world.
    pub fn to_z_up(self) -> Quat {
        match self {
            // (x, y, z) -> (x, -z, y), a proper rotation so meshes are not mirrored
            UpAxis::Y => Quat::from_rotation_x(FRAC_PI_2),
            UpAxis::Z => Quat::IDENTITY,
        }
    }
}

/// A named mesh placed in the world.
///
/// Mesh data stays in the source convention; `rotation` converts it to Z-up.
/// `location` and `scale` are pending until [`SceneObject::apply_location_scale`]
/// bakes them into the vertices.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub triangles: Vec<Triangle>,
    pub rotation: Quat,
    pub location: Vec3,
    pub scale: f32,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>, up_axis: UpAxis) -> Self {
        Self {
            name: name.into(),
            triangles,
            rotation: up_axis.to_z_up(),
            location: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.location)
    }

    /// Bounding box of the raw mesh data, in the source convention.
    pub fn local_bounds(&self) -> AABB {
        let points: Vec<Vec3> = self
            .triangles
            .iter()
            .flat_map(|t| [t.v0, t.v1, t.v2])
            .collect();
        AABB::from_points(&points)
    }

    /// The 8 local bounding-box corners re-expressed in the Z-up world.
    pub fn world_bound_box(&self) -> [Vec3; 8] {
        let world = self.world_matrix();
        self.local_bounds().corners().map(|c| world.transform_point3(c))
    }

    /// Moves the object in world space.
    pub fn translate(&mut self, offset: Vec3) {
        self.location += offset;
    }

    /// Uniform scale about the world origin.
    pub fn resize(&mut self, factor: f32) {
        self.location *= factor;
        self.scale *= factor;
    }

    /// Bakes location and scale into the mesh, keeping only the rotation.
    pub fn apply_location_scale(&mut self) {
        let inverse_rotation = self.rotation.inverse();
        let bake = Mat4::from_quat(inverse_rotation) * self.world_matrix();
        for triangle in &mut self.triangles {
            *triangle = triangle.transformed(&bake);
        }
        self.location = Vec3::ZERO;
        self.scale = 1.0;
    }

    /// Triangles in world space, ready for a renderer.
    pub fn world_triangles(&self) -> Vec<Triangle> {
        let world = self.world_matrix();
        self.triangles.iter().map(|t| t.transformed(&world)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle_object(up_axis: UpAxis) -> SceneObject {
        SceneObject::new(
            "tri",
            vec![Triangle::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
                [1.0; 3],
            )],
            up_axis,
        )
    }

    #[test]
    fn test_y_up_maps_to_z_up() {
        let object = unit_triangle_object(UpAxis::Y);
        let bounds = AABB::from_points(&object.world_bound_box());
        // local +Y height becomes world +Z height
        assert!((bounds.max.z - 2.0).abs() < 1e-5);
        assert!(bounds.extent().y.abs() < 1e-5);
    }

    #[test]
    fn test_apply_location_scale_preserves_world_geometry() {
        let mut object = unit_triangle_object(UpAxis::Y);
        object.translate(Vec3::new(1.0, 2.0, 3.0));
        object.resize(2.0);
        let before = object.world_triangles();

        object.apply_location_scale();

        assert_eq!(object.location, Vec3::ZERO);
        assert_eq!(object.scale, 1.0);
        let after = object.world_triangles();
        for (a, b) in before.iter().zip(&after) {
            assert!((a.v0 - b.v0).length() < 1e-5);
            assert!((a.v1 - b.v1).length() < 1e-5);
            assert!((a.v2 - b.v2).length() < 1e-5);
        }
    }

    #[test]
    fn test_triangle_bounds() {
        let t = Triangle::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::X, Vec3::Y, [0.5; 3]);
        let b = t.bounds();
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 2.0));
    }
}
