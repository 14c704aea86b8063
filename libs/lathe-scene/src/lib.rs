//! # Lathe Scene
//!
//! Hierarchical placement, traversal and animation of compiled lathe meshes.
//!
//! ## Architecture
//!
//! ```text
//! CompiledMesh → Renderer::upload → SceneGraph (nodes + roots)
//!                                       │
//!            Animator::tick ────────────┤
//!                                       ▼
//!                  draw_scene → TransformStack → Renderer::draw
//! ```
//!
//! The [`Renderer`] trait is the only seam to a graphics API. Everything
//! here runs headless against [`RecordingRenderer`].

pub mod animation;
pub mod error;
pub mod graph;
pub mod renderer;
pub mod satellite;
pub mod transform;

pub use animation::{Animator, Motion};
pub use error::{RendererError, SceneError, SceneResult};
pub use graph::{rotation, MeshId, NodeId, SceneGraph, SceneNode};
pub use renderer::{DrawCall, RecordingRenderer, Renderer, UploadStats};
pub use satellite::Satellite;
pub use transform::{TransformScope, TransformStack};
