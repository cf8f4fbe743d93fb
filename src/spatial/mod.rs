pub mod grid;
pub mod ray;

pub use grid::Grid;
pub use ray::{ray_intersects_box, Aabb};
