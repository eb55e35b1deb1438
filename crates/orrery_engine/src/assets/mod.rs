//! Asset loading seam
//!
//! File parsing and image decoding live outside the engine. The engine only
//! sees the [`AssetLoader`] trait: meshes come back synchronously as
//! [`MeshData`], images come back through a [`PendingImage`] that the frame
//! loop polls until the load has completed.

mod pending;

pub use pending::{ImageSender, PendingImage};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for asset operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Asset loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The requested file or URL does not exist
    #[error("Asset not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but could not be decoded
    #[error("Failed to decode {path}: {reason}")]
    Decode {
        /// Path of the offending asset
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// Decoded geometry is inconsistent
    #[error("Malformed mesh data: {0}")]
    MalformedMesh(String),

    /// The loader went away before delivering a result
    #[error("Loader dropped before {0} finished loading")]
    LoaderDropped(String),
}

/// Geometry as delivered by a mesh loader
///
/// Positions and normals are parallel arrays; `indices` describe triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Vertex normals, one per vertex
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
    /// Optional texture coordinates, one per vertex
    pub uvs: Option<Vec<[f32; 2]>>,
}

impl MeshData {
    /// Number of indices to draw
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Check that the arrays agree with each other
    pub fn validate(&self) -> AssetResult<()> {
        if self.normals.len() != self.vertices.len() {
            return Err(AssetError::MalformedMesh(format!(
                "{} normals for {} vertices",
                self.normals.len(),
                self.vertices.len()
            )));
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != self.vertices.len() {
                return Err(AssetError::MalformedMesh(format!(
                    "{} uvs for {} vertices",
                    uvs.len(),
                    self.vertices.len()
                )));
            }
        }
        if self.indices.len() % 3 != 0 {
            return Err(AssetError::MalformedMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.vertices.len();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(AssetError::MalformedMesh(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }
        Ok(())
    }
}

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Tightly packed RGBA8 pixels, row-major
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Single opaque pixel, used as a stand-in texture
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }
}

/// External asset loader
///
/// Implementations own file formats (OBJ, PNG...) and any threading needed to
/// load them; the engine never blocks on an image.
pub trait AssetLoader {
    /// Load and parse a mesh file
    fn load_mesh_file(&self, path: &Path) -> AssetResult<MeshData>;

    /// Start loading an image; the result is delivered through the returned handle
    fn load_image(&self, url: &str) -> PendingImage;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
            uvs: None,
        }
    }

    #[test]
    fn test_valid_triangle() {
        assert!(triangle().validate().is_ok());
        assert_eq!(triangle().index_count(), 3);
    }

    #[test]
    fn test_index_out_of_range_is_rejected() {
        let mut mesh = triangle();
        mesh.indices[2] = 7;
        assert!(matches!(mesh.validate(), Err(AssetError::MalformedMesh(_))));
    }

    #[test]
    fn test_missing_normals_are_rejected() {
        let mut mesh = triangle();
        mesh.normals.pop();
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_uv_count_must_match() {
        let mut mesh = triangle();
        mesh.uvs = Some(vec![[0.0, 0.0]]);
        assert!(mesh.validate().is_err());
    }
}
