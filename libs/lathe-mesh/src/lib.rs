//! # Lathe Mesh
//!
//! Procedural solid-of-revolution meshes from hand-authored 2D profiles.
//!
//! ## Architecture
//!
//! ```text
//! line()/curve() → ProfileBuilder (Skeleton) → revolve → CompiledMesh → MeshBuffers
//! ```
//!
//! ## Algorithms
//!
//! - **Curve subdivision**: recursive bisection of a quadratic span, `2^depth` samples
//! - **Revolution**: fixed angular steps about the Y axis, seam stitched modulo `S`
//!
//! ## Usage
//!
//! ```rust
//! use lathe_mesh::{palette, ProfileBuilder, RevolveParams};
//! use glam::DVec2;
//!
//! let mut profile = ProfileBuilder::new();
//! profile.curve(
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(2.0, 0.0),
//!     DVec2::new(1.0, 1.0),
//!     palette::GREEN,
//!     1,
//!     1.0,
//! )?;
//! assert_eq!(profile.len(), 3);
//!
//! let mesh = profile.compile(&RevolveParams::default())?;
//! assert_eq!(mesh.vertex_count(), 3 * 32);
//! # Ok::<(), lathe_mesh::MeshError>(())
//! ```

pub mod color;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod profile;
pub mod revolve;

pub use color::{palette, Rgba};
pub use error::{MeshError, MeshResult};
pub use mesh::{CompiledMesh, MeshBuffers};
pub use profile::{
    CurveSubdivider, ProfileBuilder, ProfileOp, ProfileSample, ProfileScript, Skeleton,
};
pub use revolve::{revolve, RevolveParams};
