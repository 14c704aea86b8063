//! # Satellite Model
//!
//! The demo scene: a capped upper stage followed by a chain of identical
//! body segments, ending in a cross of four segments. The segment mesh is
//! uploaded once and instanced by seven nodes.

use crate::error::SceneResult;
use crate::graph::{rotation, NodeId, SceneGraph};
use crate::renderer::Renderer;
use glam::{DMat4, DVec2, DVec3};
use lathe_mesh::{palette, MeshResult, ProfileBuilder, RevolveParams};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};
use tracing::info;

/// Distance between stacked segment origins.
const SEGMENT_PITCH: f64 = 10.0;

fn p(x: f64, y: f64) -> DVec2 {
    DVec2::new(x, y)
}

/// Profile of the upper stage: nozzle, hull flare, yellow ring and blue dome.
pub fn upper_stage_profile() -> MeshResult<ProfileBuilder> {
    let mut profile = ProfileBuilder::new();
    profile
        .curve(p(0.0, -4.5), p(1.0, -4.0), p(1.0, -4.2), palette::BLACK, 2, -1.0)?
        .line(p(1.0, -4.0), p(1.0, -5.0), palette::GREEN)?
        .line(p(1.0, -5.0), p(3.0, -5.0), palette::GREEN)?
        .line(p(3.0, -5.0), p(3.0, -4.0), palette::GRAY)?
        .line(p(3.0, -4.0), p(4.0, -3.0), palette::GRAY)?
        .line(p(4.0, -3.0), p(4.0, 0.0), palette::GRAY)?
        .curve(p(4.0, 0.0), p(3.5, 0.5), p(3.8, 0.5), palette::YELLOW, 4, -1.0)?
        .curve(p(3.5, 0.5), p(3.0, 1.5), p(3.2, 0.7), palette::YELLOW, 4, 1.0)?
        .line(p(3.0, 1.5), p(3.0, 3.0), palette::GRAY)?
        .line(p(3.0, 3.0), p(2.0, 4.0), palette::GRAY)?
        .curve(p(2.0, 4.0), p(0.0, 5.0), p(1.0, 5.0), palette::BLUE, 4, 1.0)?;
    Ok(profile)
}

/// Profile of a body segment: a straight hull with a coupling at each end.
pub fn body_segment_profile() -> MeshResult<ProfileBuilder> {
    let mut profile = ProfileBuilder::new();
    profile
        .curve(p(0.0, -4.5), p(1.0, -4.0), p(1.0, -4.2), palette::BLACK, 2, -1.0)?
        .line(p(1.0, -4.0), p(1.0, -5.0), palette::GREEN)?
        .line(p(1.0, -5.0), p(3.0, -5.0), palette::GREEN)?
        .line(p(3.0, -5.0), p(3.0, -4.0), palette::GRAY)?
        .line(p(3.0, -4.0), p(3.2, -3.8), palette::GRAY)?
        .line(p(3.2, -3.8), p(3.2, 3.8), palette::GRAY)?
        .line(p(3.2, 3.8), p(3.0, 4.0), palette::GRAY)?
        .line(p(3.0, 4.0), p(3.0, 5.0), palette::GRAY)?
        .line(p(3.0, 5.0), p(1.0, 5.0), palette::GREEN)?
        .line(p(1.0, 5.0), p(1.0, 4.0), palette::GREEN)?
        .curve(p(0.0, 4.5), p(1.0, 4.0), p(1.0, 4.2), palette::BLACK, 2, -1.0)?;
    Ok(profile)
}

/// Node ids of an assembled satellite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Satellite {
    /// The upper stage, registered as the scene root.
    pub root: NodeId,
    /// Body segment nodes in draw order.
    pub segments: Vec<NodeId>,
}

/// Builds both meshes, uploads them and links the satellite hierarchy.
///
/// The root is placed in front of the camera and turned 30° about Y.
pub fn assemble<R>(
    scene: &mut SceneGraph<R::Handle>,
    renderer: &mut R,
    params: &RevolveParams,
) -> SceneResult<Satellite>
where
    R: Renderer,
{
    let upper_stage = scene.add_mesh(renderer, upper_stage_profile()?.compile(params)?)?;
    let segment = scene.add_mesh(renderer, body_segment_profile()?.compile(params)?)?;

    let down = DMat4::from_translation(DVec3::new(0.0, -SEGMENT_PITCH, 0.0));
    let up = DMat4::from_translation(DVec3::new(0.0, SEGMENT_PITCH, 0.0));

    let root = scene.add_node(upper_stage)?;
    scene.translate(root, DVec3::new(0.0, -5.0, -45.0))?;
    scene.rotate(root, FRAC_PI_6, DVec3::Y)?;

    let first = scene.add_node_with_transform(segment, down)?;
    let second = scene.add_node_with_transform(segment, down)?;
    let hub = scene.add_node_with_transform(segment, down * rotation(FRAC_PI_2, DVec3::Z)?)?;
    let cross = scene.add_node_with_transform(segment, rotation(FRAC_PI_2, DVec3::X)?)?;
    let side = scene.add_node_with_transform(segment, rotation(FRAC_PI_2, DVec3::Z)?)?;
    let lower = scene.add_node_with_transform(segment, down)?;
    let upper = scene.add_node_with_transform(segment, up)?;

    scene.add_child(root, first)?;
    scene.add_child(first, second)?;
    scene.add_child(second, hub)?;
    scene.add_child(hub, cross)?;
    scene.add_child(hub, side)?;
    scene.add_child(cross, lower)?;
    scene.add_child(cross, upper)?;
    scene.add_root(root)?;

    let segments = vec![first, second, hub, cross, lower, upper, side];
    info!(
        nodes = segments.len() + 1,
        meshes = scene.mesh_count(),
        "assembled satellite"
    );
    Ok(Satellite { root, segments })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_stage_sample_count() {
        // 5 + 7 lines * 2 + 3 curves * 17
        assert_eq!(upper_stage_profile().unwrap().len(), 70);
    }

    #[test]
    fn test_body_segment_sample_count() {
        // 5 + 9 lines * 2 + 5
        assert_eq!(body_segment_profile().unwrap().len(), 28);
    }

    #[test]
    fn test_profiles_revolve() {
        let params = RevolveParams::default();
        let stage = upper_stage_profile().unwrap().compile(&params).unwrap();
        let segment = body_segment_profile().unwrap().compile(&params).unwrap();
        assert!(stage.validate());
        assert!(segment.validate());
        assert_eq!(segment.vertex_count(), 28 * 32);
    }
}
