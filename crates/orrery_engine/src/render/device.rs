//! Graphics device abstraction
//!
//! The scene never touches a graphics API directly; it creates resources and
//! issues draws through [`GraphicsDevice`]. Backends hand out opaque handles.

use super::RenderResult;
use crate::assets::{ImageData, MeshData};
use crate::foundation::math::{Mat4, Vec3};

slotmap::new_key_type! {
    /// Handle to a mesh uploaded to the device
    pub struct MeshHandle;

    /// Handle to a compiled and linked shader program
    pub struct ShaderHandle;

    /// Handle to a texture uploaded to the device
    pub struct TextureHandle;
}

/// Value assignable to a shader uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// Scalar float
    Float(f32),
    /// 3-component vector
    Vec3(Vec3),
    /// 4x4 matrix (column-major)
    Mat4(Mat4),
    /// Texture bound to a sampler uniform
    Texture(TextureHandle),
}

/// Depth comparison used for the depth test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    /// Pass when the incoming depth is smaller
    Less,
    /// Pass when the incoming depth is smaller or equal
    LessEqual,
}

/// Fixed-function state that scripts may change for a single draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    /// Depth comparison function
    pub depth_func: DepthFunc,
    /// Whether draws write to the depth buffer
    pub depth_write: bool,
    /// Whether back faces are culled
    pub cull_back_faces: bool,
}

impl RenderState {
    /// State used for regular opaque geometry
    pub const OPAQUE: Self = Self {
        depth_func: DepthFunc::Less,
        depth_write: true,
        cull_back_faces: true,
    };

    /// State used for a skybox drawn behind everything else
    pub const SKYBOX: Self = Self {
        depth_func: DepthFunc::LessEqual,
        depth_write: false,
        cull_back_faces: false,
    };
}

impl Default for RenderState {
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Rendering backend used by the scene
pub trait GraphicsDevice {
    /// Upload geometry and return its handle
    fn create_mesh(&mut self, mesh: &MeshData) -> RenderResult<MeshHandle>;

    /// Compile and link a shader program
    ///
    /// Compile or link failures are returned as errors; the handle is only
    /// produced for a usable program.
    fn create_shader(&mut self, vertex_source: &str, fragment_source: &str) -> RenderResult<ShaderHandle>;

    /// Upload an RGBA8 image as a texture
    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle>;

    /// Set a uniform on a shader program
    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue) -> RenderResult<()>;

    /// Draw a mesh with a shader, using the uniforms currently set on it
    fn draw(&mut self, mesh: MeshHandle, shader: ShaderHandle) -> RenderResult<()>;

    /// Change fixed-function state for subsequent draws
    fn set_render_state(&mut self, state: RenderState) -> RenderResult<()>;
}
