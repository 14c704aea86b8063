//! # Curve Subdivision
//!
//! Approximates a quadratic curve by recursive bisection.
//!
//! ## Algorithm
//!
//! For a span `start -> end` bent by `pivot`:
//! 1. `m1` = midpoint(start, pivot), `m2` = midpoint(end, pivot)
//! 2. `m3` = intersection of line(start, m2) and line(end, m1)
//! 3. Recurse on `(start, m1, m3)` then `(m3, m2, end)`
//!
//! At depth zero the span contributes a single sample at `start`, so a
//! call at depth `d` emits `2^d` samples. The span's `end` is never
//! emitted; the caller appends it.

use super::ProfileSample;
use crate::color::Rgba;
use crate::error::MeshResult;
use crate::geometry::{line_intersection, midpoint};
use glam::DVec2;

/// Emits curve samples whose normals aim at a fixed mirror point.
#[derive(Debug, Clone, Copy)]
pub struct CurveSubdivider {
    mirror: DVec2,
    normal_scale: f64,
    color: Rgba,
}

impl CurveSubdivider {
    /// Creates a subdivider.
    ///
    /// # Arguments
    ///
    /// * `mirror` - Point every sample normal is aimed at
    /// * `normal_scale` - Scale applied to `mirror - sample`; negative flips the normal
    /// * `color` - Color of every emitted sample
    pub fn new(mirror: DVec2, normal_scale: f64, color: Rgba) -> Self {
        Self {
            mirror,
            normal_scale,
            color,
        }
    }

    /// Normal for a sample at `position`, not yet normalized.
    #[inline]
    pub fn normal_at(&self, position: DVec2) -> DVec2 {
        (self.mirror - position) * self.normal_scale
    }

    /// Appends `2^depth` samples approximating `start -> end` around `pivot`.
    ///
    /// Samples are written in curve order. On error `out` may hold part
    /// of the curve; callers collect into a scratch buffer.
    pub fn subdivide(
        &self,
        start: DVec2,
        pivot: DVec2,
        end: DVec2,
        depth: u32,
        out: &mut Vec<ProfileSample>,
    ) -> MeshResult<()> {
        if depth == 0 {
            out.push(ProfileSample::new(start, self.normal_at(start), self.color));
            return Ok(());
        }

        let m1 = midpoint(start, pivot);
        let m2 = midpoint(end, pivot);
        let m3 = line_intersection(start, m2, end, m1)?;

        self.subdivide(start, m1, m3, depth - 1, out)?;
        self.subdivide(m3, m2, end, depth - 1, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette::GREEN;
    use approx::assert_relative_eq;

    fn subdivider() -> CurveSubdivider {
        CurveSubdivider::new(DVec2::new(1.0, -1.0), 1.0, GREEN)
    }

    #[test]
    fn test_depth_zero_emits_start_only() {
        let mut out = Vec::new();
        subdivider()
            .subdivide(DVec2::ZERO, DVec2::ONE, DVec2::new(2.0, 0.0), 0, &mut out)
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position, DVec2::ZERO);
        assert_eq!(out[0].normal, DVec2::new(1.0, -1.0));
        assert_eq!(out[0].color, GREEN);
    }

    #[test]
    fn test_sample_count_doubles_per_level() {
        for depth in 0..6 {
            let mut out = Vec::new();
            subdivider()
                .subdivide(DVec2::ZERO, DVec2::ONE, DVec2::new(2.0, 0.0), depth, &mut out)
                .unwrap();
            assert_eq!(out.len(), 1 << depth);
        }
    }

    #[test]
    fn test_depth_one_splits_at_intersection() {
        let mut out = Vec::new();
        subdivider()
            .subdivide(DVec2::ZERO, DVec2::ONE, DVec2::new(2.0, 0.0), 1, &mut out)
            .unwrap();
        assert_eq!(out[0].position, DVec2::ZERO);
        assert_relative_eq!(out[1].position.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[1].position.y, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out[1].normal.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(out[1].normal.y, -4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_samples_progress_along_curve() {
        let mut out = Vec::new();
        subdivider()
            .subdivide(DVec2::ZERO, DVec2::ONE, DVec2::new(2.0, 0.0), 4, &mut out)
            .unwrap();
        for pair in out.windows(2) {
            assert!(pair[1].position.x > pair[0].position.x);
        }
    }

    #[test]
    fn test_negative_scale_flips_normal() {
        let flipped = CurveSubdivider::new(DVec2::new(1.0, -1.0), -2.0, GREEN);
        assert_eq!(flipped.normal_at(DVec2::ZERO), DVec2::new(-2.0, 2.0));
    }
}
