//! File-backed asset loader
//!
//! Meshes are parsed synchronously with `tobj`. Images are decoded with
//! `image` on a worker thread and handed back through a [`PendingImage`].

use orrery_engine::assets::{AssetError, AssetLoader, AssetResult, ImageData, MeshData, PendingImage};
use std::path::{Path, PathBuf};

/// Loads assets relative to a root directory
#[derive(Debug, Clone)]
pub struct FileAssetLoader {
    root: PathBuf,
}

impl FileAssetLoader {
    /// Resolve every path against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl AssetLoader for FileAssetLoader {
    fn load_mesh_file(&self, path: &Path) -> AssetResult<MeshData> {
        let path = self.resolve(path);
        if !path.exists() {
            return Err(AssetError::NotFound(path));
        }

        let (models, _materials) = tobj::load_obj(&path, &tobj::GPU_LOAD_OPTIONS).map_err(|e| {
            AssetError::Decode {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;
        let model = models.into_iter().next().ok_or_else(|| AssetError::Decode {
            path: path.clone(),
            reason: "file contains no models".to_string(),
        })?;

        let mesh = mesh_from_obj(model.mesh);
        mesh.validate()?;
        log::info!(
            "Loaded mesh '{}' from {}: {} vertices, {} indices",
            model.name,
            path.display(),
            mesh.vertices.len(),
            mesh.index_count()
        );
        Ok(mesh)
    }

    fn load_image(&self, url: &str) -> PendingImage {
        let path = self.resolve(Path::new(url));
        let (sender, pending) = PendingImage::channel(url);
        std::thread::spawn(move || {
            let result = decode_image(&path);
            // The receiver is gone if the scene was dropped mid-load.
            let _ = sender.send(result);
        });
        pending
    }
}

fn mesh_from_obj(mesh: tobj::Mesh) -> MeshData {
    let vertices: Vec<[f32; 3]> = mesh.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect();

    // Fall back to radial normals, which suits the round bodies this app draws.
    let normals = if mesh.normals.len() == mesh.positions.len() {
        mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect()
    } else {
        vertices
            .iter()
            .map(|&[x, y, z]| {
                let length = (x * x + y * y + z * z).sqrt();
                if length > 0.0 {
                    [x / length, y / length, z / length]
                } else {
                    [0.0, 1.0, 0.0]
                }
            })
            .collect()
    };

    let uvs = (mesh.texcoords.len() / 2 == vertices.len() && !vertices.is_empty()).then(|| {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| [t[0], 1.0 - t[1]])
            .collect()
    });

    MeshData {
        vertices,
        normals,
        indices: mesh.indices,
        uvs,
    }
}

fn decode_image(path: &Path) -> AssetResult<ImageData> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let image = image::open(path).map_err(|e| AssetError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Decoded {}x{} image from {}", width, height, path.display());
    Ok(ImageData {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}
