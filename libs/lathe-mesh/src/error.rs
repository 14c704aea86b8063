//! # Mesh Errors
//!
//! Error types for profile construction and revolution.
//!
//! ## Error Policy
//!
//! - Geometry errors abort the enclosing build step
//! - No partially built profile or mesh is handed onward
//! - Nothing here is retried; every failure is a caller precondition

use thiserror::Error;

/// Errors that can occur while building a profile or compiling a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The skeleton is too short to form a single profile edge.
    #[error("Invalid skeleton: {count} samples (need at least 2)")]
    InvalidSkeleton { count: usize },

    /// Coincident control points or a zero-length normal source.
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Control points the line-intersection step cannot handle.
    #[error("Unsupported control configuration: {message}")]
    UnsupportedControlConfiguration { message: String },

    /// Too few angular steps to sweep a surface.
    #[error("Invalid angular steps: {steps} (min: {min})")]
    InvalidAngularSteps { steps: u32, min: u32 },

    /// Curve recursion depth above the configured limit.
    #[error("Subdivision too deep: {depth} (max: {max})")]
    SubdivisionTooDeep { depth: u32, max: u32 },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// A profile script could not be parsed.
    #[error("Invalid profile script: {0}")]
    InvalidScript(#[from] serde_json::Error),
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an unsupported control configuration error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedControlConfiguration {
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
