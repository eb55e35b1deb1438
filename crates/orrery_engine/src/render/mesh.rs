//! Renderable meshes
//!
//! A [`Mesh`] pairs shared geometry with the device handle it gets once
//! uploaded. Several objects may share one `MeshData`; each keeps its own
//! handle, created during the scene's start phase.

use super::device::{GraphicsDevice, MeshHandle, ShaderHandle};
use super::RenderResult;
use crate::assets::MeshData;
use std::rc::Rc;

/// What happened when an object asked to be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The draw call was issued
    Drawn,
    /// The mesh is not on the device yet; try again next frame
    Skipped,
}

/// Geometry plus its device handle once uploaded
#[derive(Debug, Clone)]
pub struct Mesh {
    data: Rc<MeshData>,
    handle: Option<MeshHandle>,
}

impl Mesh {
    /// Wrap geometry that has not been uploaded yet
    pub fn new(data: Rc<MeshData>) -> Self {
        Self { data, handle: None }
    }

    /// Shared geometry
    pub fn data(&self) -> &MeshData {
        &self.data
    }

    /// Device handle, if uploaded
    pub fn handle(&self) -> Option<MeshHandle> {
        self.handle
    }

    /// Whether the mesh can be drawn
    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    /// Upload the geometry if it is not on the device yet
    pub fn setup(&mut self, device: &mut dyn GraphicsDevice) -> RenderResult<MeshHandle> {
        if let Some(handle) = self.handle {
            return Ok(handle);
        }
        let handle = device.create_mesh(&self.data)?;
        log::debug!(
            "Uploaded mesh: {} vertices, {} indices",
            self.data.vertices.len(),
            self.data.index_count()
        );
        self.handle = Some(handle);
        Ok(handle)
    }

    /// Draw with the given shader, or skip while not uploaded
    pub fn draw(&self, device: &mut dyn GraphicsDevice, shader: ShaderHandle) -> RenderResult<DrawOutcome> {
        match self.handle {
            Some(handle) => {
                device.draw(handle, shader)?;
                Ok(DrawOutcome::Drawn)
            }
            None => Ok(DrawOutcome::Skipped),
        }
    }
}
