//! Components owned by scene objects

pub mod transform;

pub use transform::TransformComponent;
