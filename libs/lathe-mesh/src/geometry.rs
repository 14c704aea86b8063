//! # Profile-Space Geometry
//!
//! 2D helpers shared by the profile builder and the curve subdivider.

use crate::error::{MeshError, MeshResult};
use config::constants::{approx_zero, EPSILON};
use glam::DVec2;

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: DVec2, b: DVec2) -> DVec2 {
    (a + b) * 0.5
}

/// Reflection of the chord midpoint of `start`/`end` across `control`.
///
/// Curve normals point from each sample toward this point.
#[inline]
pub fn mirror_point(start: DVec2, end: DVec2, control: DVec2) -> DVec2 {
    control + (midpoint(start, end) - control) * 2.0
}

/// Unit normal of the segment `from -> to`, its direction rotated by -90°.
pub fn flat_normal(from: DVec2, to: DVec2) -> MeshResult<DVec2> {
    let delta = to - from;
    let length = delta.length();
    if length < EPSILON {
        return Err(MeshError::degenerate(format!(
            "line endpoints coincide at ({}, {})",
            from.x, from.y
        )));
    }
    Ok(DVec2::new(delta.y, -delta.x) / length)
}

/// Intersection of line(a, b) with line(c, d).
///
/// Both lines are solved in slope-intercept form, so a vertical line on
/// either side is rejected rather than special-cased.
pub fn line_intersection(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> MeshResult<DVec2> {
    let delta1 = a - b;
    let delta2 = c - d;
    if approx_zero(delta1.x) || approx_zero(delta2.x) {
        return Err(MeshError::unsupported(format!(
            "vertical segment in intersection of ({}, {})-({}, {}) and ({}, {})-({}, {})",
            a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y
        )));
    }

    let slope1 = delta1.y / delta1.x;
    let slope2 = delta2.y / delta2.x;
    if approx_zero(slope1 - slope2) {
        return Err(MeshError::degenerate("parallel lines have no intersection"));
    }

    let offset1 = a.y - slope1 * a.x;
    let offset2 = c.y - slope2 * c.x;
    let x = (offset2 - offset1) / (slope1 - slope2);
    Ok(DVec2::new(x, slope1 * x + offset1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midpoint() {
        assert_eq!(
            midpoint(DVec2::new(0.0, 0.0), DVec2::new(2.0, 4.0)),
            DVec2::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_mirror_point_reflects_across_control() {
        let m = mirror_point(DVec2::ZERO, DVec2::new(2.0, 0.0), DVec2::new(1.0, 1.0));
        assert_eq!(m, DVec2::new(1.0, -1.0));
    }

    #[test]
    fn test_flat_normal_points_right_of_direction() {
        let n = flat_normal(DVec2::ZERO, DVec2::new(1.0, 0.0)).unwrap();
        assert_relative_eq!(n.x, 0.0);
        assert_relative_eq!(n.y, -1.0);

        let n = flat_normal(DVec2::new(1.0, 0.0), DVec2::new(1.0, 3.0)).unwrap();
        assert_relative_eq!(n.x, 1.0);
        assert_relative_eq!(n.y, 0.0);
    }

    #[test]
    fn test_flat_normal_rejects_coincident_points() {
        let err = flat_normal(DVec2::ONE, DVec2::ONE).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_line_intersection() {
        let p = line_intersection(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.5, 0.5),
            DVec2::new(2.0, 0.0),
            DVec2::new(0.5, 0.5),
        )
        .unwrap();
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_line_intersection_vertical_unsupported() {
        let err = line_intersection(
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 1.0),
        )
        .unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedControlConfiguration { .. }));
    }

    #[test]
    fn test_line_intersection_parallel_degenerate() {
        let err = line_intersection(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 2.0),
        )
        .unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry { .. }));
    }
}
