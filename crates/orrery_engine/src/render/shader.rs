//! Shader programs

use super::device::{GraphicsDevice, ShaderHandle, UniformValue};
use super::{RenderError, RenderResult};
use crate::foundation::math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Uniform names the scene writes before every object's update
pub mod uniforms {
    /// Object-to-world matrix
    pub const MODEL: &str = "model";
    /// World-to-camera matrix
    pub const VIEW: &str = "view";
    /// Camera-to-clip matrix
    pub const PROJECTION: &str = "projection";
    /// Camera world position, for specular lighting
    pub const VIEW_POSITION: &str = "viewPos";
    /// Light position written by planets
    pub const LIGHT_POSITION: &str = "lightPos";
    /// Light color written by planets
    pub const LIGHT_COLOR: &str = "lightColor";
    /// Skybox projection matrix
    pub const SKYBOX_PROJECTION: &str = "uProjectionMatrix";
    /// Skybox view matrix, translation removed
    pub const SKYBOX_VIEW: &str = "uViewMatrix";
    /// Skybox texture sampler
    pub const SKYBOX_SAMPLER: &str = "uSkybox";
}

/// Source files for a shader program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderSourcePaths {
    /// Vertex shader path
    pub vertex: PathBuf,
    /// Fragment shader path
    pub fragment: PathBuf,
}

impl ShaderSourcePaths {
    /// Create a new pair of shader paths
    pub fn new(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Resolve both paths against a base directory
    pub fn resolve(&self, base: &Path) -> Self {
        Self {
            vertex: base.join(&self.vertex),
            fragment: base.join(&self.fragment),
        }
    }
}

/// A compiled shader program
///
/// Constructing a `Shader` is the only way to get a handle, so any object
/// holding one is known to have a usable program.
#[derive(Debug, Clone)]
pub struct Shader {
    label: String,
    handle: ShaderHandle,
}

impl Shader {
    /// Compile a program from source strings
    pub fn compile(
        device: &mut dyn GraphicsDevice,
        label: impl Into<String>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> RenderResult<Self> {
        let label = label.into();
        let handle = device.create_shader(vertex_source, fragment_source).map_err(|e| {
            log::error!("Shader '{}' failed to build: {}", label, e);
            e
        })?;
        log::info!("Shader '{}' ready", label);
        Ok(Self { label, handle })
    }

    /// Read both stages from disk and compile them
    pub fn from_files(
        device: &mut dyn GraphicsDevice,
        label: impl Into<String>,
        paths: &ShaderSourcePaths,
    ) -> RenderResult<Self> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|e| {
                RenderError::ResourceCreationFailed(format!("reading {}: {}", path.display(), e))
            })
        };
        let vertex = read(&paths.vertex)?;
        let fragment = read(&paths.fragment)?;
        Self::compile(device, label, &vertex, &fragment)
    }

    /// Device handle of the program
    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }

    /// Human readable name
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Push the per-object camera uniforms to a shader
pub fn push_camera_uniforms(
    device: &mut dyn GraphicsDevice,
    shader: ShaderHandle,
    model: Mat4,
    view: Mat4,
    projection: Mat4,
    view_position: Vec3,
) -> RenderResult<()> {
    device.set_uniform(shader, uniforms::MODEL, UniformValue::Mat4(model))?;
    device.set_uniform(shader, uniforms::VIEW, UniformValue::Mat4(view))?;
    device.set_uniform(shader, uniforms::PROJECTION, UniformValue::Mat4(projection))?;
    device.set_uniform(shader, uniforms::VIEW_POSITION, UniformValue::Vec3(view_position))
}
