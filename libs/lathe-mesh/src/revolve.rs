//! # Revolution
//!
//! Sweeps a skeleton around the vertical (Y) axis to build a solid of
//! revolution.
//!
//! ## Algorithm
//!
//! 1. Normalize every sample normal (zero-length normals are rejected)
//! 2. For each step `i` in `0..S` at angle `θ = 2π·i/S`, emit every sample
//!    as `(x·cos θ, y, x·sin θ)`, rotating normals the same way
//! 3. For each band `i -> i+1 (mod S)` and profile edge `j -> j+1`, emit
//!    `(i,j) (i,j+1) (i+1,j)` and `(i+1,j) (i+1,j+1) (i,j+1)`
//!
//! The modulo in step 3 stitches the last band back to the first so the
//! surface has no seam gap. Profile ends are not capped; a closed model
//! must taper its skeleton to `x = 0` at both ends.
//!
//! Both triangles of a quad walk their shared edge `(i,j+1) -> (i+1,j)` in
//! the same direction, so the two halves face opposite ways. Renderers must
//! draw with back-face culling disabled; lighting comes from the per-vertex
//! normals, not from winding.

use crate::error::{MeshError, MeshResult};
use crate::mesh::CompiledMesh;
use crate::profile::Skeleton;
use config::constants::{DEFAULT_ANGULAR_STEPS, EPSILON, MAX_VERTICES, MIN_ANGULAR_STEPS};
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;
use tracing::debug;

/// Parameters for revolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevolveParams {
    /// Number of angular steps around the axis
    pub angular_steps: u32,
}

impl Default for RevolveParams {
    fn default() -> Self {
        Self {
            angular_steps: DEFAULT_ANGULAR_STEPS,
        }
    }
}

impl RevolveParams {
    /// Parameters with an explicit step count.
    pub fn with_steps(angular_steps: u32) -> Self {
        Self { angular_steps }
    }
}

/// Revolves a skeleton around the Y axis.
///
/// Produces `N·S` vertices and `2·(N−1)·S` triangles for a skeleton of
/// `N` samples swept through `S` steps.
///
/// # Errors
///
/// - [`MeshError::InvalidSkeleton`] for fewer than 2 samples
/// - [`MeshError::InvalidAngularSteps`] below [`MIN_ANGULAR_STEPS`]
/// - [`MeshError::DegenerateGeometry`] for a zero-length sample normal
/// - [`MeshError::TooManyVertices`] above [`MAX_VERTICES`]
pub fn revolve(skeleton: &Skeleton, params: &RevolveParams) -> MeshResult<CompiledMesh> {
    let n = skeleton.len();
    let steps = params.angular_steps;

    if n < 2 {
        return Err(MeshError::InvalidSkeleton { count: n });
    }
    if steps < MIN_ANGULAR_STEPS {
        return Err(MeshError::InvalidAngularSteps {
            steps,
            min: MIN_ANGULAR_STEPS,
        });
    }

    let s = steps as usize;
    let vertex_count = n.checked_mul(s).unwrap_or(usize::MAX);
    if vertex_count > MAX_VERTICES {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
            max: MAX_VERTICES,
        });
    }

    let unit_normals = skeleton
        .samples()
        .iter()
        .enumerate()
        .map(|(j, sample)| {
            let length = sample.normal.length();
            if length.is_nan() || length < EPSILON {
                return Err(MeshError::degenerate(format!(
                    "sample {j} at ({}, {}) has a zero-length normal",
                    sample.position.x, sample.position.y
                )));
            }
            Ok(sample.normal / length)
        })
        .collect::<MeshResult<Vec<DVec2>>>()?;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut colors = Vec::with_capacity(vertex_count);

    for i in 0..s {
        let theta = TAU * i as f64 / s as f64;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for (sample, normal) in skeleton.samples().iter().zip(&unit_normals) {
            positions.push(sweep(sample.position, cos_theta, sin_theta));
            normals.push(sweep(*normal, cos_theta, sin_theta));
            colors.push(sample.color);
        }
    }

    let mut triangles = Vec::with_capacity(2 * (n - 1) * s);
    for i in 0..s {
        let ring = i * n;
        let next_ring = ((i + 1) % s) * n;

        for j in 0..n - 1 {
            let a = (ring + j) as u32;
            let b = (ring + j + 1) as u32;
            let c = (next_ring + j) as u32;
            let d = (next_ring + j + 1) as u32;

            triangles.push([a, b, c]);
            triangles.push([c, d, b]);
        }
    }

    debug!(
        samples = n,
        angular_steps = steps,
        vertices = positions.len(),
        triangles = triangles.len(),
        "revolved skeleton"
    );

    Ok(CompiledMesh::from_parts(positions, normals, colors, triangles, n, steps))
}

/// Rotates a profile-space point about the Y axis.
#[inline]
fn sweep(p: DVec2, cos_theta: f64, sin_theta: f64) -> DVec3 {
    DVec3::new(p.x * cos_theta, p.y, p.x * sin_theta)
}
