//! # Colors
//!
//! Per-sample RGBA colors, components in [0.0, 1.0].

/// RGBA color, f32 for GPU upload.
pub type Rgba = [f32; 4];

/// Named colors used by the bundled models.
pub mod palette {
    use super::Rgba;

    pub const BLACK: Rgba = [0.1, 0.1, 0.1, 1.0];
    pub const GRAY: Rgba = [0.4, 0.4, 0.4, 1.0];
    pub const GREEN: Rgba = [0.1, 0.4, 0.1, 1.0];
    pub const YELLOW: Rgba = [0.4, 0.4, 0.0, 1.0];
    pub const BLUE: Rgba = [0.1, 0.3, 0.5, 1.0];
    pub const RED: Rgba = [0.5, 0.1, 0.1, 1.0];
}
