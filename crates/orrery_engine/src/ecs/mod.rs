//! Entity identity and per-object components
//!
//! The scene keeps objects in a flat ordered list; this module only provides
//! the id type and the transform component each object owns.

pub mod entity;
pub mod components;

pub use entity::ObjectId;
pub use components::TransformComponent;
