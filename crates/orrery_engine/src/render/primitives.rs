//! Procedural meshes

use crate::assets::MeshData;
use std::f32::consts::PI;

/// UV sphere centred on the origin
///
/// `latitudes` rings from pole to pole, `longitudes` segments around the axis.
/// Normals point outwards; uvs wrap once around the equator.
pub fn uv_sphere(radius: f32, latitudes: u32, longitudes: u32) -> MeshData {
    let latitudes = latitudes.max(2);
    let longitudes = longitudes.max(3);
    let mut mesh = MeshData {
        uvs: Some(Vec::new()),
        ..MeshData::default()
    };

    for lat in 0..=latitudes {
        let theta = lat as f32 * PI / latitudes as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for lon in 0..=longitudes {
            let phi = lon as f32 * 2.0 * PI / longitudes as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = [cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            mesh.vertices.push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            mesh.normals.push(normal);
            if let Some(uvs) = mesh.uvs.as_mut() {
                uvs.push([lon as f32 / longitudes as f32, lat as f32 / latitudes as f32]);
            }
        }
    }

    for lat in 0..latitudes {
        for lon in 0..longitudes {
            let first = lat * (longitudes + 1) + lon;
            let second = first + longitudes + 1;
            mesh.indices.extend_from_slice(&[first, second, first + 1]);
            mesh.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }
    mesh
}

/// Unit cube used as skybox geometry: 24 vertices, 36 indices
pub fn skybox_cube() -> MeshData {
    #[rustfmt::skip]
    let vertices: Vec<[f32; 3]> = vec![
        // Front face
        [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
        // Back face
        [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],
        // Top face
        [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
        // Bottom face
        [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
        // Right face
        [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
        // Left face
        [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
    ];
    // The skybox is seen from inside, so normals face the centre.
    let normals = vertices
        .chunks(4)
        .flat_map(|face| {
            let c = face[0];
            let axis = if face.iter().all(|v| v[0] == c[0]) {
                [-c[0], 0.0, 0.0]
            } else if face.iter().all(|v| v[1] == c[1]) {
                [0.0, -c[1], 0.0]
            } else {
                [0.0, 0.0, -c[2]]
            };
            std::iter::repeat(axis).take(4)
        })
        .collect();
    let indices = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    MeshData {
        vertices,
        normals,
        indices,
        uvs: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_counts() {
        let sphere = uv_sphere(1.0, 8, 16);
        assert_eq!(sphere.vertices.len(), 9 * 17);
        assert_eq!(sphere.indices.len(), 8 * 16 * 6);
        assert!(sphere.validate().is_ok());
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let sphere = uv_sphere(2.5, 6, 6);
        for v in &sphere.vertices {
            let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert_relative_eq!(length, 2.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_skybox_cube_layout() {
        let cube = skybox_cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.validate().is_ok());
        // Front face normals point back into the cube.
        assert_eq!(cube.normals[0], [0.0, 0.0, -1.0]);
    }
}
