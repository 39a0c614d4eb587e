use crate::scene::Triangle;
use glam::Vec3;

/// Result of triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleIntersection {
    pub t: f32,       // Distance along ray
    pub u: f32,       // Barycentric coordinate u
    pub v: f32,       // Barycentric coordinate v
    pub normal: Vec3, // Geometric normal, counter-clockwise winding
}

impl TriangleIntersection {
    /// Normal flipped to face back along the ray, for two-sided shading
    pub fn facing_normal(&self, ray_dir: Vec3) -> Vec3 {
        if self.normal.dot(ray_dir) > 0.0 {
            -self.normal
        } else {
            self.normal
        }
    }
}

/// Möller-Trumbore ray-triangle intersection algorithm
pub fn moller_trumbore_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleIntersection> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection behind origin
    if t < EPSILON {
        return None;
    }

    let normal = edge1.cross(edge2).normalize();

    Some(TriangleIntersection { t, u, v, normal })
}

/// Intersection against a scene triangle
pub fn intersect_triangle(
    ray_origin: Vec3,
    ray_dir: Vec3,
    triangle: &Triangle,
) -> Option<TriangleIntersection> {
    moller_trumbore_intersect(ray_origin, ray_dir, triangle.v0, triangle.v1, triangle.v2)
}
