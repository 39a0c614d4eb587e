pub mod bvh;
pub mod triangle_intersection;

pub use bvh::{BVHNode, BVHPrimitive, BVHStats};
pub use triangle_intersection::{
    intersect_triangle, moller_trumbore_intersect, TriangleIntersection,
};
