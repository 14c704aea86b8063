//! # Config Crate
//!
//! Centralized configuration constants for the lathe pipeline.
//! Tolerances, tessellation defaults, animation timing and viewport
//! defaults all live here so the mesh and scene crates never carry
//! their own literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_ANGULAR_STEPS, MIN_ANGULAR_STEPS, EPSILON};
//!
//! let requested: Option<u32> = None;
//! let steps = requested.unwrap_or(DEFAULT_ANGULAR_STEPS);
//! assert!(steps >= MIN_ANGULAR_STEPS);
//!
//! let length: f64 = 1e-12;
//! assert!(length < EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain Rust values only
//! - **Documented**: Every constant states what consumes it

pub mod constants;

pub use constants::{ConfigError, LatheConfig};
