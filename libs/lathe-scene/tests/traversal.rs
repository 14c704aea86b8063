//! Scene traversal tests against the recording renderer.

use glam::{DMat4, DVec2, DVec3, DVec4};
use lathe_mesh::{palette, MeshBuffers, ProfileBuilder, RevolveParams};
use lathe_scene::{
    satellite, Animator, Motion, RecordingRenderer, Renderer, RendererError, SceneError, SceneGraph,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};
use std::time::Duration;

fn cone() -> lathe_mesh::CompiledMesh {
    let mut profile = ProfileBuilder::new();
    profile
        .line(DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0), palette::BLUE)
        .unwrap();
    profile.compile(&RevolveParams::with_steps(8)).unwrap()
}

fn assert_mat_eq(actual: DMat4, expected: DMat4) {
    assert!(
        actual.abs_diff_eq(expected, 1e-9),
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn test_child_composes_with_parent() {
    let mut renderer = RecordingRenderer::new(500, 300).unwrap();
    let mut scene = SceneGraph::new();
    let mesh = scene.add_mesh(&mut renderer, cone()).unwrap();

    let tr = DMat4::from_translation(DVec3::new(0.0, 0.0, -10.0)) * DMat4::from_rotation_y(0.3);
    let tc = DMat4::from_translation(DVec3::new(2.0, 0.0, 0.0));

    let root = scene.add_node_with_transform(mesh, tr).unwrap();
    let child = scene.add_node_with_transform(mesh, tc).unwrap();
    let sibling = scene.add_node(mesh).unwrap();
    scene.add_child(root, child).unwrap();
    scene.add_child(root, sibling).unwrap();
    scene.add_root(root).unwrap();

    assert_eq!(scene.draw_scene(&mut renderer).unwrap(), 3);

    let draws = renderer.draws();
    assert_mat_eq(draws[0].world, tr);
    assert_mat_eq(draws[1].world, tr * tc);
    // The child's transform must not leak into the next sibling.
    assert_mat_eq(draws[2].world, tr);
}

#[test]
fn test_child_local_transform_applies_first() {
    let mut renderer = RecordingRenderer::new(500, 300).unwrap();
    let mut scene = SceneGraph::new();
    let mesh = scene.add_mesh(&mut renderer, cone()).unwrap();

    let root = scene
        .add_node_with_transform(mesh, DMat4::from_rotation_z(FRAC_PI_2))
        .unwrap();
    let child = scene
        .add_node_with_transform(mesh, DMat4::from_translation(DVec3::X))
        .unwrap();
    scene.add_child(root, child).unwrap();
    scene.add_root(root).unwrap();
    scene.draw_scene(&mut renderer).unwrap();

    // Translate along X, then rotate 90° about Z: the origin lands on +Y.
    let origin = renderer.draws()[1].world * DVec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(origin.truncate().abs_diff_eq(DVec3::Y, 1e-12));
}

#[test]
fn test_shared_subtree_draws_under_each_parent() {
    let mut renderer = RecordingRenderer::new(500, 300).unwrap();
    let mut scene = SceneGraph::new();
    let mesh = scene.add_mesh(&mut renderer, cone()).unwrap();

    let left = scene
        .add_node_with_transform(mesh, DMat4::from_translation(-DVec3::X))
        .unwrap();
    let right = scene
        .add_node_with_transform(mesh, DMat4::from_translation(DVec3::X))
        .unwrap();
    let shared = scene
        .add_node_with_transform(mesh, DMat4::from_translation(DVec3::Y))
        .unwrap();
    scene.add_child(left, shared).unwrap();
    scene.add_child(right, shared).unwrap();
    scene.add_root(left).unwrap();
    scene.add_root(right).unwrap();

    assert_eq!(scene.draw_scene(&mut renderer).unwrap(), 4);
    assert_eq!(renderer.uploads().len(), 1);

    let draws = renderer.draws();
    assert_mat_eq(draws[1].world, DMat4::from_translation(DVec3::new(-1.0, 1.0, 0.0)));
    assert_mat_eq(draws[3].world, DMat4::from_translation(DVec3::new(1.0, 1.0, 0.0)));
}

#[test]
fn test_replaced_root_transform_applies_to_next_frame() {
    let mut renderer = RecordingRenderer::new(500, 300).unwrap();
    let mut scene = SceneGraph::new();
    let mesh = scene.add_mesh(&mut renderer, cone()).unwrap();
    assert_eq!(scene.mesh(mesh).unwrap().angular_steps(), 8);

    let root = scene
        .add_node_with_transform(mesh, DMat4::from_translation(DVec3::Z))
        .unwrap();
    let child = scene
        .add_node_with_transform(mesh, DMat4::from_rotation_x(0.25))
        .unwrap();
    scene.add_child(root, child).unwrap();
    scene.add_root(root).unwrap();
    scene.draw_scene(&mut renderer).unwrap();

    let moved = DMat4::from_translation(DVec3::new(0.0, 4.0, -30.0));
    scene.set_local_transform(root, moved).unwrap();
    scene.draw_scene(&mut renderer).unwrap();

    let second: Vec<_> = renderer.frame_draws(2).collect();
    assert_eq!(second.len(), 2);
    assert_mat_eq(second[0].world, moved);
    assert_mat_eq(second[1].world, moved * DMat4::from_rotation_x(0.25));
    assert_mat_eq(scene.node(child).unwrap().local_transform(), DMat4::from_rotation_x(0.25));
}

#[test]
fn test_cycle_is_rejected() {
    let mut renderer = RecordingRenderer::new(500, 300).unwrap();
    let mut scene = SceneGraph::new();
    let mesh = scene.add_mesh(&mut renderer, cone()).unwrap();

    let a = scene.add_node(mesh).unwrap();
    let b = scene.add_node(mesh).unwrap();
    scene.add_child(a, b).unwrap();

    let err = scene.add_child(b, a).unwrap_err();
    assert!(matches!(err, SceneError::Cycle { .. }));
    assert!(err.to_string().contains("cycle"));
}

/// Records like [`RecordingRenderer`] but fails one chosen draw call.
struct FlakyRenderer {
    inner: RecordingRenderer,
    fail_at: Option<usize>,
    calls: usize,
}

impl Renderer for FlakyRenderer {
    type Handle = usize;

    fn upload(&mut self, buffers: &MeshBuffers) -> Result<usize, RendererError> {
        self.inner.upload(buffers)
    }

    fn begin_frame(&mut self) -> Result<(), RendererError> {
        self.inner.begin_frame()
    }

    fn draw(&mut self, handle: usize, world: &DMat4) -> Result<(), RendererError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(RendererError::draw("lost context"));
        }
        self.inner.draw(handle, world)
    }
}

#[test]
fn test_draw_error_propagates_and_next_frame_is_clean() {
    let mut renderer = FlakyRenderer {
        inner: RecordingRenderer::new(500, 300).unwrap(),
        fail_at: Some(2),
        calls: 0,
    };
    let mut scene = SceneGraph::new();
    let mesh = scene.add_mesh(&mut renderer, cone()).unwrap();

    let t = DMat4::from_translation(DVec3::Z);
    let root = scene.add_node_with_transform(mesh, t).unwrap();
    let a = scene.add_node_with_transform(mesh, t).unwrap();
    let b = scene.add_node_with_transform(mesh, t).unwrap();
    scene.add_child(root, a).unwrap();
    scene.add_child(a, b).unwrap();
    scene.add_root(root).unwrap();

    let err = scene.draw_scene(&mut renderer).unwrap_err();
    assert!(matches!(err, SceneError::Renderer(RendererError::Draw { .. })));

    renderer.fail_at = None;
    renderer.inner.clear_draws();
    assert_eq!(scene.draw_scene(&mut renderer).unwrap(), 3);
    let draws = renderer.inner.draws();
    assert_mat_eq(draws[2].world, DMat4::from_translation(DVec3::new(0.0, 0.0, 3.0)));
}

#[test]
fn test_satellite_frame() {
    let mut renderer = RecordingRenderer::new(500, 300).unwrap();
    let mut scene = SceneGraph::new();
    let sat = satellite::assemble(&mut scene, &mut renderer, &RevolveParams::default()).unwrap();

    assert_eq!(scene.roots(), &[sat.root]);
    assert_eq!(sat.segments.len(), 7);
    assert_eq!(renderer.uploads().len(), 2);
    assert_eq!(renderer.uploads()[0].vertex_count, 70 * 32);
    assert_eq!(renderer.uploads()[1].vertex_count, 28 * 32);

    assert_eq!(scene.draw_scene(&mut renderer).unwrap(), 8);
    let draws: Vec<_> = renderer.frame_draws(1).collect();
    assert_eq!(draws.len(), 8);
    assert_eq!(draws[0].handle, 0);
    assert!(draws[1..].iter().all(|call| call.handle == 1));

    let root = DMat4::from_translation(DVec3::new(0.0, -5.0, -45.0))
        * DMat4::from_rotation_y(FRAC_PI_6);
    let down = DMat4::from_translation(DVec3::new(0.0, -10.0, 0.0));
    assert_mat_eq(draws[0].world, root);
    assert_mat_eq(draws[1].world, root * down);
    assert_mat_eq(draws[2].world, root * down * down);
}

#[test]
fn test_animation_moves_satellite_root() {
    let mut renderer = RecordingRenderer::new(500, 300).unwrap();
    let mut scene = SceneGraph::new();
    let params = RevolveParams::with_steps(8);
    let sat = satellite::assemble(&mut scene, &mut renderer, &params).unwrap();
    let before = scene.node(sat.root).unwrap().local_transform();

    let mut animator = Animator::new(sat.root, Motion::default(), Duration::ZERO);
    assert_eq!(animator.tick(&mut scene, &mut renderer).unwrap(), 8);

    let after = scene.node(sat.root).unwrap().local_transform();
    assert_mat_eq(after, before * Motion::default().transform());
    assert_eq!(renderer.frame_count(), 1);
}

#[test]
fn test_satellite_root_is_in_front_of_camera() {
    let mut renderer = RecordingRenderer::new(500, 300).unwrap();
    let mut scene = SceneGraph::new();
    satellite::assemble(&mut scene, &mut renderer, &RevolveParams::with_steps(8)).unwrap();
    scene.draw_scene(&mut renderer).unwrap();

    let clip = renderer.projection() * renderer.draws()[0].world * DVec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(clip.w > 0.0);
    assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && ndc.z.abs() <= 1.0);
}
