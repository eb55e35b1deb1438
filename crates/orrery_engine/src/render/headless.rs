//! Headless graphics device
//!
//! Records every call instead of talking to a GPU. Used by tests and by the
//! offline simulation runner; shader sources get a minimal sanity check so
//! compile errors still surface the way a real driver would report them.

use super::device::{
    GraphicsDevice, MeshHandle, RenderState, ShaderHandle, TextureHandle, UniformValue,
};
use super::{RenderError, RenderResult, ShaderStage};
use crate::assets::{ImageData, MeshData};
use slotmap::SlotMap;
use std::collections::HashMap;

/// Minimal vertex stage accepted by the headless device
pub const PASSTHROUGH_VERTEX_SHADER: &str = r"#version 300 es
layout(location = 0) in vec3 aPos;
uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;
void main() {
    gl_Position = projection * view * model * vec4(aPos, 1.0);
}
";

/// Minimal fragment stage accepted by the headless device
pub const FLAT_FRAGMENT_SHADER: &str = r"#version 300 es
precision mediump float;
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0);
}
";

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    /// A mesh was uploaded
    CreateMesh(MeshHandle),
    /// A shader program was built
    CreateShader(ShaderHandle),
    /// A texture was uploaded
    CreateTexture(TextureHandle),
    /// A uniform was written
    SetUniform {
        /// Target program
        shader: ShaderHandle,
        /// Uniform name
        name: String,
    },
    /// A draw was issued
    Draw {
        /// Mesh drawn
        mesh: MeshHandle,
        /// Program used
        shader: ShaderHandle,
    },
    /// Fixed-function state changed
    SetRenderState(RenderState),
}

#[derive(Debug)]
struct MeshRecord {
    index_count: usize,
}

#[derive(Debug, Default)]
struct ShaderRecord {
    uniforms: HashMap<String, UniformValue>,
}

#[derive(Debug)]
struct TextureRecord {
    width: u32,
    height: u32,
}

/// Graphics device that records calls in memory
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    meshes: SlotMap<MeshHandle, MeshRecord>,
    shaders: SlotMap<ShaderHandle, ShaderRecord>,
    textures: SlotMap<TextureHandle, TextureRecord>,
    render_state: RenderState,
    calls: Vec<DeviceCall>,
}

impl HeadlessDevice {
    /// Create an empty device
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, in order
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Forget the recorded calls, keeping resources alive
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of draws recorded
    pub fn draw_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DeviceCall::Draw { .. })).count()
    }

    /// Draws recorded with a given shader
    pub fn draws_with(&self, shader: ShaderHandle) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::Draw { shader: s, .. } if *s == shader))
            .count()
    }

    /// Current value of a uniform
    pub fn uniform(&self, shader: ShaderHandle, name: &str) -> Option<&UniformValue> {
        self.shaders.get(shader)?.uniforms.get(name)
    }

    /// Whether the shader handle is live
    pub fn has_shader(&self, shader: ShaderHandle) -> bool {
        self.shaders.contains_key(shader)
    }

    /// Number of meshes uploaded
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Index count of an uploaded mesh
    pub fn mesh_index_count(&self, mesh: MeshHandle) -> Option<usize> {
        self.meshes.get(mesh).map(|m| m.index_count)
    }

    /// Size of an uploaded texture
    pub fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(texture).map(|t| (t.width, t.height))
    }

    /// Fixed-function state currently in effect
    pub fn render_state(&self) -> RenderState {
        self.render_state
    }

    fn check_stage(stage: ShaderStage, source: &str) -> RenderResult<()> {
        if source.trim().is_empty() {
            return Err(RenderError::ShaderCompilation {
                stage,
                log: "empty source".to_string(),
            });
        }
        if !source.contains("void main") {
            return Err(RenderError::ShaderCompilation {
                stage,
                log: "missing entry point 'void main'".to_string(),
            });
        }
        Ok(())
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_mesh(&mut self, mesh: &MeshData) -> RenderResult<MeshHandle> {
        mesh.validate()
            .map_err(|e| RenderError::ResourceCreationFailed(e.to_string()))?;
        let handle = self.meshes.insert(MeshRecord {
            index_count: mesh.index_count(),
        });
        self.calls.push(DeviceCall::CreateMesh(handle));
        Ok(handle)
    }

    fn create_shader(&mut self, vertex_source: &str, fragment_source: &str) -> RenderResult<ShaderHandle> {
        Self::check_stage(ShaderStage::Vertex, vertex_source)?;
        Self::check_stage(ShaderStage::Fragment, fragment_source)?;
        if !vertex_source.contains("gl_Position") {
            return Err(RenderError::ShaderLink(
                "vertex stage never writes gl_Position".to_string(),
            ));
        }
        let handle = self.shaders.insert(ShaderRecord::default());
        self.calls.push(DeviceCall::CreateShader(handle));
        Ok(handle)
    }

    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle> {
        let expected = image.width as usize * image.height as usize * 4;
        if image.width == 0 || image.height == 0 || image.pixels.len() != expected {
            return Err(RenderError::ResourceCreationFailed(format!(
                "texture {}x{} with {} bytes",
                image.width,
                image.height,
                image.pixels.len()
            )));
        }
        let handle = self.textures.insert(TextureRecord {
            width: image.width,
            height: image.height,
        });
        self.calls.push(DeviceCall::CreateTexture(handle));
        Ok(handle)
    }

    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue) -> RenderResult<()> {
        if let UniformValue::Texture(texture) = value {
            if !self.textures.contains_key(texture) {
                return Err(RenderError::UnknownHandle(format!("texture {texture:?}")));
            }
        }
        let record = self
            .shaders
            .get_mut(shader)
            .ok_or_else(|| RenderError::UnknownHandle(format!("shader {shader:?}")))?;
        record.uniforms.insert(name.to_string(), value);
        self.calls.push(DeviceCall::SetUniform {
            shader,
            name: name.to_string(),
        });
        Ok(())
    }

    fn draw(&mut self, mesh: MeshHandle, shader: ShaderHandle) -> RenderResult<()> {
        if !self.meshes.contains_key(mesh) {
            return Err(RenderError::UnknownHandle(format!("mesh {mesh:?}")));
        }
        if !self.shaders.contains_key(shader) {
            return Err(RenderError::UnknownHandle(format!("shader {shader:?}")));
        }
        self.calls.push(DeviceCall::Draw { mesh, shader });
        Ok(())
    }

    fn set_render_state(&mut self, state: RenderState) -> RenderResult<()> {
        self.render_state = state;
        self.calls.push(DeviceCall::SetRenderState(state));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::primitives;

    #[test]
    fn test_records_mesh_and_draw() {
        let mut device = HeadlessDevice::new();
        let mesh = device.create_mesh(&primitives::skybox_cube()).unwrap();
        let shader = device
            .create_shader(PASSTHROUGH_VERTEX_SHADER, FLAT_FRAGMENT_SHADER)
            .unwrap();
        device.draw(mesh, shader).unwrap();

        assert_eq!(device.mesh_index_count(mesh), Some(36));
        assert_eq!(device.draw_count(), 1);
        assert_eq!(device.calls().last(), Some(&DeviceCall::Draw { mesh, shader }));
    }

    #[test]
    fn test_link_failure_without_gl_position() {
        let mut device = HeadlessDevice::new();
        let result = device.create_shader("void main() {}", FLAT_FRAGMENT_SHADER);
        assert!(matches!(result, Err(RenderError::ShaderLink(_))));
    }

    #[test]
    fn test_fragment_stage_reported() {
        let mut device = HeadlessDevice::new();
        let result = device.create_shader(PASSTHROUGH_VERTEX_SHADER, "   ");
        assert!(matches!(
            result,
            Err(RenderError::ShaderCompilation { stage: ShaderStage::Fragment, .. })
        ));
    }

    #[test]
    fn test_malformed_mesh_rejected() {
        let mut device = HeadlessDevice::new();
        let mut mesh = primitives::skybox_cube();
        mesh.indices.push(99);
        assert!(device.create_mesh(&mesh).is_err());
        assert_eq!(device.mesh_count(), 0);
    }

    #[test]
    fn test_texture_size_checked() {
        let mut device = HeadlessDevice::new();
        let bad = ImageData { width: 2, height: 2, pixels: vec![0; 3] };
        assert!(device.create_texture(&bad).is_err());
        let good = device.create_texture(&ImageData::solid([9, 9, 9, 255])).unwrap();
        assert_eq!(device.texture_size(good), Some((1, 1)));
    }

    #[test]
    fn test_unknown_handles_rejected() {
        let mut device = HeadlessDevice::new();
        let mesh = device.create_mesh(&primitives::skybox_cube()).unwrap();
        assert!(device.draw(mesh, ShaderHandle::default()).is_err());
        assert!(device
            .set_uniform(ShaderHandle::default(), "model", UniformValue::Float(1.0))
            .is_err());
    }
}
