//! Rendering layer
//!
//! Everything the scene needs to put pixels on screen without knowing which
//! graphics API is underneath:
//!
//! - [`GraphicsDevice`]: the backend seam (meshes, shaders, textures, draws)
//! - [`Camera`]: orbit camera producing the view matrix
//! - [`Shader`] and [`Mesh`]: per-object resources with lazy device upload
//! - [`HeadlessDevice`]: in-memory backend for tests and offline runs
//! - [`Viewport`]: source of the aspect ratio

pub mod camera;
pub mod device;
pub mod headless;
pub mod mesh;
pub mod primitives;
pub mod shader;
pub mod viewport;

pub use camera::Camera;
pub use device::{
    DepthFunc, GraphicsDevice, MeshHandle, RenderState, ShaderHandle, TextureHandle, UniformValue,
};
pub use headless::{DeviceCall, HeadlessDevice};
pub use mesh::{DrawOutcome, Mesh};
pub use shader::{Shader, ShaderSourcePaths};
pub use viewport::{FixedViewport, Viewport};

use std::fmt;
use thiserror::Error;

/// Shader pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A shader stage failed to compile
    ///
    /// Fatal for that program; the objects using it will not render.
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompilation {
        /// Stage that failed
        stage: ShaderStage,
        /// Compiler log
        log: String,
    },

    /// The stages compiled but could not be linked into a program
    #[error("Shader program failed to link: {0}")]
    ShaderLink(String),

    /// Resource creation or management failed
    ///
    /// Occurs when meshes, textures or shader sources cannot be turned into
    /// device resources, typically because the data is invalid.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A handle did not refer to a live device resource
    #[error("Unknown handle: {0}")]
    UnknownHandle(String),

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
