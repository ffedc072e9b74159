//! CPU-side mesh data and procedural solid generators.
//!
//! Everything in this module is pure: generators take a center point and
//! extents and deterministically append into a [`MeshData`], which is handed
//! to the GPU upload layer exactly once. No GPU types appear here.
//!
//! - [`MeshData`] holds the three parallel buffers (positions, texture
//!   coordinates, triangle indices)
//! - [`solids`] contains the generators for boxes, planes, pyramids and
//!   spheres

pub mod solids;

use crate::math::Vector3;

/// Failures of mesh construction and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("sphere tessellation requires at least 3 sectors and 3 stacks, got {sectors}x{stacks}")]
    InvalidTessellation { sectors: u32, stacks: u32 },
    #[error("mesh buffers disagree: {vertices} vertices but {tex_coords} texture coordinate pairs")]
    MismatchedTexCoords { vertices: usize, tex_coords: usize },
    #[error("index {index} references a vertex outside the mesh ({vertices} vertices)")]
    IndexOutOfBounds { index: u32, vertices: usize },
}

/// Vertex positions, texture coordinates and triangle indices as flat,
/// parallel buffers — the exact layout the GPU upload expects.
///
/// A generator appends into the three buffers and the finished value is then
/// treated as immutable. [`validate`](Self::validate) is run before upload to
/// catch buffers that fell out of step.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshData {
    positions: Vec<f32>,
    tex_coords: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            tex_coords: Vec::with_capacity(vertices * 2),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    pub fn push_position(&mut self, position: Vector3) {
        self.positions.extend_from_slice(&position.to_array());
    }

    pub fn push_tex_coord(&mut self, tex_coord: [f32; 2]) {
        self.tex_coords.extend_from_slice(&tex_coord);
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Flat position components, three per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat texture coordinates, two per vertex.
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Triangle indices, three per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check that the parallel buffers agree before the mesh leaves the CPU.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertices = self.vertex_count();
        if self.tex_coords.len() != vertices * 2 {
            return Err(GeometryError::MismatchedTexCoords {
                vertices,
                tex_coords: self.tex_coords.len() / 2,
            });
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertices) {
            return Err(GeometryError::IndexOutOfBounds { index, vertices });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_consistent_buffers() {
        let mut mesh = MeshData::new();
        mesh.push_position(Vector3::new(0.0, 0.0, 0.0));
        mesh.push_position(Vector3::new(1.0, 0.0, 0.0));
        mesh.push_position(Vector3::new(0.0, 1.0, 0.0));
        for uv in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]] {
            mesh.push_tex_coord(uv);
        }
        mesh.push_triangle(0, 1, 2);
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn validate_rejects_missing_tex_coords() {
        let mut mesh = MeshData::new();
        mesh.push_position(Vector3::ZERO);
        assert_eq!(
            mesh.validate(),
            Err(GeometryError::MismatchedTexCoords {
                vertices: 1,
                tex_coords: 0
            })
        );
    }

    #[test]
    fn validate_rejects_out_of_range_indices() {
        let mut mesh = MeshData::new();
        mesh.push_position(Vector3::ZERO);
        mesh.push_tex_coord([0.0, 0.0]);
        mesh.push_triangle(0, 0, 7);
        assert_eq!(
            mesh.validate(),
            Err(GeometryError::IndexOutOfBounds {
                index: 7,
                vertices: 1
            })
        );
    }
}
