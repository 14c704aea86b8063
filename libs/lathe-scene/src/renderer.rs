//! # Renderer Seam
//!
//! The scene never touches a GPU context directly. A [`Renderer`] is the
//! explicit context object: it receives flattened buffers once per mesh and
//! one world transform per draw call.
//!
//! [`RecordingRenderer`] is a headless implementation that validates uploads
//! and records every draw, used by tests and the demo binary.

use crate::error::RendererError;
use config::constants::{DEFAULT_FOV_Y_DEGREES, DEFAULT_Z_FAR, DEFAULT_Z_NEAR};
use glam::DMat4;
use lathe_mesh::MeshBuffers;
use std::fmt;
use tracing::trace;

/// Consumer of compiled mesh buffers.
pub trait Renderer {
    /// Handle to GPU-side storage for one uploaded mesh.
    type Handle: Copy + fmt::Debug;

    /// Allocates storage for a mesh's buffers.
    fn upload(&mut self, buffers: &MeshBuffers) -> Result<Self::Handle, RendererError>;

    /// Prepares a new frame (clear, viewport, projection).
    fn begin_frame(&mut self) -> Result<(), RendererError> {
        Ok(())
    }

    /// Issues one indexed triangle-list draw with the given world transform.
    fn draw(&mut self, handle: Self::Handle, world: &DMat4) -> Result<(), RendererError>;
}

/// Statistics kept for every uploaded mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    /// Frame the call belongs to (0 before the first `begin_frame`)
    pub frame: usize,
    /// Index of the uploaded mesh
    pub handle: usize,
    /// World transform the mesh was drawn with
    pub world: DMat4,
}

/// Headless renderer that records uploads and draws.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    width: u32,
    height: u32,
    projection: DMat4,
    uploads: Vec<UploadStats>,
    draws: Vec<DrawCall>,
    frame: usize,
}

impl RecordingRenderer {
    /// Creates a renderer for a viewport of the given size.
    ///
    /// # Errors
    ///
    /// [`RendererError::Initialization`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, RendererError> {
        if width == 0 || height == 0 {
            return Err(RendererError::initialization(format!(
                "viewport {width}x{height} has no area"
            )));
        }

        let aspect = f64::from(width) / f64::from(height);
        let projection = DMat4::perspective_rh_gl(
            DEFAULT_FOV_Y_DEGREES.to_radians(),
            aspect,
            DEFAULT_Z_NEAR,
            DEFAULT_Z_FAR,
        );

        Ok(Self {
            width,
            height,
            projection,
            uploads: Vec::new(),
            draws: Vec::new(),
            frame: 0,
        })
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Perspective projection for the viewport.
    pub fn projection(&self) -> DMat4 {
        self.projection
    }

    /// Every accepted upload, indexed by handle.
    pub fn uploads(&self) -> &[UploadStats] {
        &self.uploads
    }

    /// Every draw call recorded so far.
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Draw calls belonging to one frame.
    pub fn frame_draws(&self, frame: usize) -> impl Iterator<Item = &DrawCall> {
        self.draws.iter().filter(move |call| call.frame == frame)
    }

    /// Number of frames begun.
    pub fn frame_count(&self) -> usize {
        self.frame
    }

    /// Drops recorded draw calls, keeping uploads and the frame counter.
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl Renderer for RecordingRenderer {
    type Handle = usize;

    fn upload(&mut self, buffers: &MeshBuffers) -> Result<usize, RendererError> {
        let vertex_count = buffers.vertex_count();
        if buffers.positions.len() % 3 != 0
            || buffers.normals.len() != buffers.positions.len()
            || buffers.colors.len() != vertex_count * 4
        {
            return Err(RendererError::upload("attribute buffer lengths disagree"));
        }
        if buffers.indices.len() % 3 != 0 {
            return Err(RendererError::upload("index buffer is not a triangle list"));
        }
        if let Some(&index) = buffers.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(RendererError::upload(format!(
                "index {index} out of range for {vertex_count} vertices"
            )));
        }

        self.uploads.push(UploadStats {
            vertex_count,
            triangle_count: buffers.triangle_count(),
        });
        Ok(self.uploads.len() - 1)
    }

    fn begin_frame(&mut self) -> Result<(), RendererError> {
        self.frame += 1;
        Ok(())
    }

    fn draw(&mut self, handle: usize, world: &DMat4) -> Result<(), RendererError> {
        if handle >= self.uploads.len() {
            return Err(RendererError::draw(format!("unknown mesh handle {handle}")));
        }
        trace!(frame = self.frame, handle, "draw");
        self.draws.push(DrawCall {
            frame: self.frame,
            handle,
            world: *world,
        });
        Ok(())
    }
}
