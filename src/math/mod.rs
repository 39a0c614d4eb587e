mod aabb;
mod color;
mod look_at;
mod ray;

pub use aabb::AABB;
pub use color::{hsv_to_rgb, linear_to_srgb, luminance};
pub use look_at::{look_at, to_rows, WORLD_UP};
pub use ray::intersect_aabb;
