//! # Scene Errors
//!
//! Error types for scene assembly, traversal and the renderer seam.

use crate::graph::{MeshId, NodeId};
use glam::DVec3;
use lathe_mesh::MeshError;
use thiserror::Error;

/// Errors reported by a [`Renderer`](crate::Renderer) implementation.
#[derive(Debug, Error)]
pub enum RendererError {
    /// Context or shader program setup failed. Fatal, never retried.
    #[error("Renderer initialization failed: {message}")]
    Initialization { message: String },

    /// Buffers were rejected on upload.
    #[error("Mesh upload failed: {message}")]
    Upload { message: String },

    /// A draw call failed.
    #[error("Draw call failed: {message}")]
    Draw { message: String },
}

impl RendererError {
    /// Creates an initialization error.
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    /// Creates an upload error.
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    /// Creates a draw error.
    pub fn draw(message: impl Into<String>) -> Self {
        Self::Draw {
            message: message.into(),
        }
    }
}

/// Errors that can occur while assembling or drawing a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Geometry construction failed
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// The renderer rejected an operation
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Unknown mesh: {0}")]
    UnknownMesh(MeshId),

    /// Linking would make a node its own ancestor
    #[error("Linking {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    /// Rotation axis has zero length
    #[error("Invalid rotation axis: {0}")]
    InvalidAxis(DVec3),
}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SceneError::from(RendererError::initialization("unable to link shaders"));
        assert!(err.to_string().contains("unable to link shaders"));

        let err = SceneError::from(MeshError::InvalidSkeleton { count: 1 });
        assert!(err.to_string().contains("Invalid skeleton"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SceneError>();
    }
}
