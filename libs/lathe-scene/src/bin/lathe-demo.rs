//! Lathe Demo
//!
//! Builds the satellite scene (or a scripted profile) against the headless
//! recording renderer and runs the animation loop for a fixed tick count.
//!
//! # Usage
//!
//! ```bash
//! lathe-demo --ticks 200
//! lathe-demo --steps 64 --interval-ms 5
//! lathe-demo --profile vase.json
//! RUST_LOG=lathe_scene=trace lathe-demo --ticks 1
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use config::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use config::LatheConfig;
use glam::DVec3;
use lathe_mesh::{ProfileBuilder, ProfileScript, RevolveParams};
use lathe_scene::{satellite, Animator, NodeId, RecordingRenderer, SceneGraph};

#[derive(Parser)]
#[command(name = "lathe-demo")]
#[command(author, version, about = "Revolve 2D profiles and animate the scene")]
struct Args {
    /// Number of animation ticks to run
    #[arg(long, short = 't', default_value = "100")]
    ticks: u64,

    /// Angular steps per revolved mesh
    #[arg(long, short = 's')]
    steps: Option<u32>,

    /// Milliseconds between ticks
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: u32,

    /// JSON profile script to revolve instead of the satellite
    #[arg(long, short = 'p')]
    profile: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let defaults = LatheConfig::default();
    let config = LatheConfig::new(
        args.steps.unwrap_or(defaults.angular_steps),
        args.interval_ms.unwrap_or(defaults.tick_interval_ms),
    )
    .context("invalid configuration")?;

    let mut renderer = RecordingRenderer::new(args.width, args.height)?;
    let mut scene = SceneGraph::new();
    let params = RevolveParams::with_steps(config.angular_steps);

    let root = match args.profile.as_deref() {
        Some(path) => scripted_scene(&mut scene, &mut renderer, &params, path)?,
        None => satellite::assemble(&mut scene, &mut renderer, &params)?.root,
    };

    let mut animator = Animator::from_config(root, &config);
    let drawn = animator.run(&mut scene, &mut renderer, args.ticks)?;

    let vertices: usize = renderer.uploads().iter().map(|u| u.vertex_count).sum();
    let triangles: usize = renderer.uploads().iter().map(|u| u.triangle_count).sum();
    tracing::info!(
        frames = renderer.frame_count(),
        draws = drawn,
        meshes = scene.mesh_count(),
        nodes = scene.node_count(),
        vertices,
        triangles,
        "done"
    );
    Ok(())
}

/// Revolves a profile script into a single root node placed in view.
fn scripted_scene(
    scene: &mut SceneGraph<usize>,
    renderer: &mut RecordingRenderer,
    params: &RevolveParams,
    path: &Path,
) -> Result<NodeId> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let script = ProfileScript::from_json(&source)
        .with_context(|| format!("failed to parse profile {}", path.display()))?;
    tracing::info!(ops = script.ops.len(), samples = script.sample_count(), "loaded profile");

    let mesh = ProfileBuilder::from_script(&script)?.compile(params)?;
    let mesh = scene.add_mesh(renderer, mesh)?;
    let root = scene.add_node(mesh)?;
    scene.translate(root, DVec3::new(0.0, 0.0, -20.0))?;
    scene.add_root(root)?;
    Ok(root)
}
