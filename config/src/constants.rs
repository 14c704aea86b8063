//! # Configuration Constants
//!
//! Centralized constants for the lathe pipeline. Profile subdivision,
//! revolution, scene animation and viewport values are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Revolution**: Angular step counts for the revolution compiler
//! - **Limits**: Maximum values for safety bounds
//! - **Animation**: Timer period and per-tick motion
//! - **Viewport**: Default projection parameters

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Lengths and slope denominators below this value are treated as zero:
/// coincident control points, zero-length normals and vertical segments.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn is_zero_length(len: f64) -> bool {
///     len < EPSILON
/// }
///
/// assert!(is_zero_length(1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance when checking that a normal is unit length.
///
/// # Example
///
/// ```rust
/// use config::constants::UNIT_NORMAL_TOLERANCE;
///
/// let length: f64 = 1.0 + 1e-9;
/// assert!((length - 1.0).abs() < UNIT_NORMAL_TOLERANCE);
/// ```
pub const UNIT_NORMAL_TOLERANCE: f64 = 1e-6;

// =============================================================================
// REVOLUTION CONSTANTS
// =============================================================================

/// Default number of angular steps used to sweep a profile around the axis.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_ANGULAR_STEPS;
///
/// let user_steps: Option<u32> = None;
/// assert_eq!(user_steps.unwrap_or(DEFAULT_ANGULAR_STEPS), 32);
/// ```
pub const DEFAULT_ANGULAR_STEPS: u32 = 32;

/// Minimum number of angular steps for a revolved surface to enclose volume.
///
/// Fewer than three steps collapses the sweep into a plane.
pub const MIN_ANGULAR_STEPS: u32 = 3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum recursion depth for curve subdivision.
///
/// A curve at depth `d` emits `2^d` samples, so this bounds a single
/// curve call to 65536 samples.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_SUBDIVISION_DEPTH;
///
/// let depth = 4;
/// assert!(depth <= MAX_SUBDIVISION_DEPTH);
/// ```
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Maximum number of vertices in a single compiled mesh.
///
/// Index buffers are `u32`, and this keeps every mesh well inside that range.
pub const MAX_VERTICES: usize = 10_000_000;

// =============================================================================
// ANIMATION CONSTANTS
// =============================================================================

/// Wall-clock period between animation ticks, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 25;

/// Distance the animated root moves along its local Y axis per tick.
pub const DEFAULT_TRANSLATE_STEP: f64 = 0.01;

/// Angle in radians the animated root rotates about its local X axis per tick.
pub const DEFAULT_ROTATE_STEP: f64 = 0.01;

// =============================================================================
// VIEWPORT CONSTANTS
// =============================================================================

/// Default viewport width in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 500;

/// Default viewport height in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 300;

/// Vertical field of view of the default perspective projection, in degrees.
pub const DEFAULT_FOV_Y_DEGREES: f64 = 45.0;

/// Near clip plane distance.
pub const DEFAULT_Z_NEAR: f64 = 0.1;

/// Far clip plane distance.
pub const DEFAULT_Z_FAR: f64 = 100.0;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Default color when none is specified (light gray).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Immutable snapshot of the runtime settings shared between crates.
///
/// # Examples
/// ```
/// use config::constants::LatheConfig;
/// let config = LatheConfig::default();
/// assert_eq!(config.angular_steps, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatheConfig {
    /// Angular steps used when revolving profiles.
    pub angular_steps: u32,
    /// Animation timer period in milliseconds.
    pub tick_interval_ms: u64,
}

impl LatheConfig {
    /// Builds a configuration, rejecting values the pipeline cannot use.
    ///
    /// # Examples
    /// ```
    /// use config::constants::LatheConfig;
    /// let cfg = LatheConfig::new(16, 40).expect("valid config");
    /// assert_eq!(cfg.angular_steps, 16);
    /// ```
    pub fn new(angular_steps: u32, tick_interval_ms: u64) -> Result<Self, ConfigError> {
        if angular_steps < MIN_ANGULAR_STEPS {
            return Err(ConfigError::InvalidAngularSteps(angular_steps));
        }
        if tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(Self {
            angular_steps,
            tick_interval_ms,
        })
    }
}

impl Default for LatheConfig {
    fn default() -> Self {
        Self {
            angular_steps: DEFAULT_ANGULAR_STEPS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the requested step count cannot form a revolved surface.
    InvalidAngularSteps(u32),
    /// Raised when the animation period is zero.
    InvalidTickInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAngularSteps(value) => {
                write!(f, "angular_steps must be >= {MIN_ANGULAR_STEPS}: {value}")
            }
            ConfigError::InvalidTickInterval => write!(f, "tick_interval_ms must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Checks if a length is within [`UNIT_NORMAL_TOLERANCE`] of one.
///
/// # Example
///
/// ```rust
/// use config::constants::is_unit_length;
///
/// assert!(is_unit_length(1.0 - 1e-8));
/// assert!(!is_unit_length(0.9));
/// ```
#[inline]
pub fn is_unit_length(length: f64) -> bool {
    (length - 1.0).abs() < UNIT_NORMAL_TOLERANCE
}
