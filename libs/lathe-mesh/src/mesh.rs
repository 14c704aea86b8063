//! # Compiled Mesh
//!
//! Immutable output of the revolution compiler: positions, unit normals,
//! colors and triangle indices, laid out ring by ring.

use crate::color::Rgba;
use config::constants::is_unit_length;
use glam::DVec3;

/// Geometry produced by revolving a skeleton.
///
/// Vertex `(step, sample)` lives at index `step * profile_len + sample`.
/// Buffers cannot change after compilation; placement in a scene is the
/// scene graph's concern.
#[derive(Debug, Clone)]
pub struct CompiledMesh {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    colors: Vec<Rgba>,
    triangles: Vec<[u32; 3]>,
    profile_len: usize,
    angular_steps: u32,
}

impl CompiledMesh {
    pub(crate) fn from_parts(
        positions: Vec<DVec3>,
        normals: Vec<DVec3>,
        colors: Vec<Rgba>,
        triangles: Vec<[u32; 3]>,
        profile_len: usize,
        angular_steps: u32,
    ) -> Self {
        Self {
            positions,
            normals,
            colors,
            triangles,
            profile_len,
            angular_steps,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of samples in the revolved skeleton.
    #[inline]
    pub fn profile_len(&self) -> usize {
        self.profile_len
    }

    /// Number of angular steps the skeleton was swept through.
    #[inline]
    pub fn angular_steps(&self) -> u32 {
        self.angular_steps
    }

    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Positions of one angular step, in skeleton order.
    ///
    /// # Panics
    ///
    /// Panics if `step >= angular_steps()`.
    pub fn ring(&self, step: u32) -> &[DVec3] {
        let start = step as usize * self.profile_len;
        &self.positions[start..start + self.profile_len]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(&first) = self.positions.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.positions[1..]
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - Attribute buffers have one entry per vertex
    /// - All triangle indices are in range
    /// - No triangle repeats an index
    /// - Every normal is unit length
    pub fn validate(&self) -> bool {
        let vertex_count = self.positions.len();
        if self.normals.len() != vertex_count || self.colors.len() != vertex_count {
            return false;
        }

        let in_range = |i: u32| (i as usize) < vertex_count;
        let triangles_ok = self.triangles.iter().all(|tri| {
            tri.iter().all(|&i| in_range(i))
                && tri[0] != tri[1]
                && tri[1] != tri[2]
                && tri[0] != tri[2]
        });

        triangles_ok && self.normals.iter().all(|n| is_unit_length(n.length()))
    }

    /// Flattens the mesh into GPU-ready buffers.
    pub fn to_buffers(&self) -> MeshBuffers {
        let mut positions = Vec::with_capacity(self.positions.len() * 3);
        for v in &self.positions {
            positions.extend_from_slice(&[v.x as f32, v.y as f32, v.z as f32]);
        }

        let mut normals = Vec::with_capacity(self.normals.len() * 3);
        for n in &self.normals {
            normals.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }

        let mut colors = Vec::with_capacity(self.colors.len() * 4);
        for color in &self.colors {
            colors.extend_from_slice(color);
        }

        let indices = self.triangles.iter().flatten().copied().collect();

        MeshBuffers {
            positions,
            normals,
            colors,
            indices,
        }
    }
}

/// Flattened vertex attributes and indices, the form a renderer uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    /// Positions as [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Unit normals as [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Colors as [r, g, b, a, ...]
    pub colors: Vec<f32>,
    /// Triangle list indices as [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette::{BLUE, RED};

    fn quad_strip() -> CompiledMesh {
        CompiledMesh::from_parts(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
            ],
            vec![DVec3::Z; 4],
            vec![RED, RED, BLUE, BLUE],
            vec![[0, 1, 2], [2, 3, 1]],
            2,
            2,
        )
    }

    #[test]
    fn test_counts_and_rings() {
        let mesh = quad_strip();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.ring(1), &[DVec3::new(0.0, 1.0, 0.0), DVec3::new(1.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = quad_strip().bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_validate_valid() {
        assert!(quad_strip().validate());
    }

    #[test]
    fn test_validate_out_of_range_index() {
        let mut mesh = quad_strip();
        mesh.triangles.push([0, 1, 4]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_validate_non_unit_normal() {
        let mut mesh = quad_strip();
        mesh.normals[0] = DVec3::new(0.0, 0.0, 2.0);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_to_buffers_flattens() {
        let buffers = quad_strip().to_buffers();
        assert_eq!(buffers.vertex_count(), 4);
        assert_eq!(buffers.triangle_count(), 2);
        assert_eq!(&buffers.positions[3..6], &[1.0f32, 0.0, 0.0]);
        assert_eq!(&buffers.colors[8..12], &BLUE);
        assert_eq!(buffers.indices, vec![0, 1, 2, 2, 3, 1]);
    }
}
