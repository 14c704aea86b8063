//! # Profile Construction
//!
//! A profile (skeleton) is the ordered 2D polyline that gets revolved.
//! It describes half of a silhouette, symmetric about the vertical axis:
//! `x` is the distance from the axis and `y` the height.
//!
//! Sample order is connectivity. Each adjacent pair of samples becomes one
//! band of quads after revolution.

mod script;
mod subdivide;


pub use script::{ProfileOp, ProfileScript};
pub use subdivide::CurveSubdivider;

use crate::color::Rgba;
use crate::error::{MeshError, MeshResult};
use crate::geometry::{flat_normal, mirror_point};
use crate::mesh::CompiledMesh;
use crate::revolve::{revolve, RevolveParams};
use config::constants::{EPSILON, MAX_SUBDIVISION_DEPTH};
use glam::DVec2;

/// One point of a profile with its shading attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSample {
    /// Position in profile space
    pub position: DVec2,
    /// Normal in profile space, not normalized until compile
    pub normal: DVec2,
    /// Vertex color
    pub color: Rgba,
}

impl ProfileSample {
    /// Creates a sample.
    pub fn new(position: DVec2, normal: DVec2, color: Rgba) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}

/// A finished, ordered sequence of profile samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    samples: Vec<ProfileSample>,
}

impl Skeleton {
    /// Wraps an ordered sample list.
    pub fn new(samples: Vec<ProfileSample>) -> Self {
        Self { samples }
    }

    /// Returns the number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the skeleton has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the samples in profile order.
    #[inline]
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// Revolves the skeleton into a mesh.
    pub fn compile(&self, params: &RevolveParams) -> MeshResult<CompiledMesh> {
        revolve(self, params)
    }
}

/// Accumulates a skeleton from straight segments and subdivided curves.
///
/// Calls chain into one continuous open polyline. Each call either appends
/// all of its samples or none of them.
///
/// # Example
///
/// ```rust
/// use lathe_mesh::{palette, ProfileBuilder, RevolveParams};
/// use glam::DVec2;
///
/// let mut profile = ProfileBuilder::new();
/// profile
///     .line(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), palette::RED)?
///     .line(DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0), palette::RED)?;
///
/// let mesh = profile.compile(&RevolveParams::with_steps(4))?;
/// assert_eq!(mesh.vertex_count(), 16);
/// assert_eq!(mesh.triangle_count(), 24);
/// # Ok::<(), lathe_mesh::MeshError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    samples: Vec<ProfileSample>,
}

impl ProfileBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a profile by replaying a script.
    pub fn from_script(script: &ProfileScript) -> MeshResult<Self> {
        let mut builder = Self::new();
        for op in &script.ops {
            builder.apply(op)?;
        }
        Ok(builder)
    }

    /// Returns the number of samples accumulated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if nothing has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the samples accumulated so far.
    #[inline]
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// Appends a straight, flat-shaded segment.
    ///
    /// Both endpoints share the segment's normal: its direction rotated by -90°.
    pub fn line(&mut self, p1: DVec2, p2: DVec2, color: Rgba) -> MeshResult<&mut Self> {
        let normal = flat_normal(p1, p2)?;
        self.samples.push(ProfileSample::new(p1, normal, color));
        self.samples.push(ProfileSample::new(p2, normal, color));
        Ok(self)
    }

    /// Appends a subdivided quadratic curve from `p1` to `p2` bent by `p3`.
    ///
    /// Normals aim at the reflection of the chord midpoint across `p3`,
    /// scaled by `normal_scale` (negative values flip them). Appends
    /// `2^depth + 1` samples, the last one at `p2`.
    ///
    /// # Errors
    ///
    /// - [`MeshError::DegenerateGeometry`] for coincident points or a zero normal scale
    /// - [`MeshError::UnsupportedControlConfiguration`] when subdivision meets a vertical segment
    /// - [`MeshError::SubdivisionTooDeep`] above [`MAX_SUBDIVISION_DEPTH`]
    pub fn curve(
        &mut self,
        p1: DVec2,
        p2: DVec2,
        p3: DVec2,
        color: Rgba,
        depth: u32,
        normal_scale: f64,
    ) -> MeshResult<&mut Self> {
        if depth > MAX_SUBDIVISION_DEPTH {
            return Err(MeshError::SubdivisionTooDeep {
                depth,
                max: MAX_SUBDIVISION_DEPTH,
            });
        }
        if p1.distance(p2) < EPSILON {
            return Err(MeshError::degenerate("curve endpoints coincide"));
        }
        if p1.distance(p3) < EPSILON || p2.distance(p3) < EPSILON {
            return Err(MeshError::degenerate("curve control point coincides with an endpoint"));
        }
        if normal_scale.abs() < EPSILON {
            return Err(MeshError::degenerate("curve normal scale is zero"));
        }

        let mirror = mirror_point(p1, p2, p3);
        let subdivider = CurveSubdivider::new(mirror, normal_scale, color);

        let mut curve = Vec::with_capacity((1usize << depth) + 1);
        subdivider.subdivide(p1, p3, p2, depth, &mut curve)?;
        curve.push(ProfileSample::new(p2, subdivider.normal_at(p2), color));

        if let Some(sample) = curve.iter().find(|s| s.normal.length() < EPSILON) {
            return Err(MeshError::degenerate(format!(
                "curve sample at ({}, {}) coincides with its normal target",
                sample.position.x, sample.position.y
            )));
        }

        self.samples.append(&mut curve);
        Ok(self)
    }

    /// Replays one scripted operation.
    pub fn apply(&mut self, op: &ProfileOp) -> MeshResult<&mut Self> {
        match *op {
            ProfileOp::Line { from, to, color } => self.line(from, to, color),
            ProfileOp::Curve {
                from,
                to,
                control,
                color,
                depth,
                normal_scale,
            } => self.curve(from, to, control, color, depth, normal_scale),
        }
    }

    /// Finishes the profile.
    pub fn finish(self) -> Skeleton {
        Skeleton::new(self.samples)
    }

    /// Finishes the profile and revolves it. The builder is consumed.
    pub fn compile(self, params: &RevolveParams) -> MeshResult<CompiledMesh> {
        self.finish().compile(params)
    }
}
