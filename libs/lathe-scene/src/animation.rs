//! # Animation
//!
//! A fixed-interval tick that nudges one node's local transform and redraws
//! the scene. Each tick post-multiplies the target's transform by the same
//! [`Motion`], so motion accumulates in the node's own frame.

use crate::error::{SceneError, SceneResult};
use crate::graph::{NodeId, SceneGraph};
use crate::renderer::Renderer;
use config::constants::{DEFAULT_ROTATE_STEP, DEFAULT_TRANSLATE_STEP};
use config::LatheConfig;
use glam::{DMat4, DVec3};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Per-tick change applied to a node: translate, then rotate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    translation: DVec3,
    angle: f64,
    axis: DVec3,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            translation: DVec3::new(0.0, DEFAULT_TRANSLATE_STEP, 0.0),
            angle: DEFAULT_ROTATE_STEP,
            axis: DVec3::X,
        }
    }
}

impl Motion {
    /// Creates a motion step.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidAxis`] if the axis has no usable direction.
    pub fn new(translation: DVec3, angle: f64, axis: DVec3) -> SceneResult<Self> {
        let axis = axis.try_normalize().ok_or(SceneError::InvalidAxis(axis))?;
        Ok(Self {
            translation,
            angle,
            axis,
        })
    }

    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn axis(&self) -> DVec3 {
        self.axis
    }

    /// The step as a matrix, `T * R`.
    pub fn transform(&self) -> DMat4 {
        DMat4::from_translation(self.translation) * DMat4::from_axis_angle(self.axis, self.angle)
    }
}

/// Drives a [`Motion`] on one node at a fixed interval.
#[derive(Debug, Clone)]
pub struct Animator {
    target: NodeId,
    motion: Motion,
    interval: Duration,
    ticks: u64,
}

impl Animator {
    pub fn new(target: NodeId, motion: Motion, interval: Duration) -> Self {
        Self {
            target,
            motion,
            interval,
            ticks: 0,
        }
    }

    /// Default motion at the configured tick interval.
    pub fn from_config(target: NodeId, config: &LatheConfig) -> Self {
        Self::new(
            target,
            Motion::default(),
            Duration::from_millis(config.tick_interval_ms),
        )
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks performed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Applies one motion step and redraws. Returns the draw count.
    pub fn tick<R>(
        &mut self,
        scene: &mut SceneGraph<R::Handle>,
        renderer: &mut R,
    ) -> SceneResult<usize>
    where
        R: Renderer,
    {
        scene.apply_transform(self.target, self.motion.transform())?;
        let drawn = scene.draw_scene(renderer)?;
        self.ticks += 1;
        debug!(tick = self.ticks, drawn, "animation tick");
        Ok(drawn)
    }

    /// Runs `count` ticks on a fixed wall-clock period.
    ///
    /// Tick `i` starts at `start + i * interval` regardless of how long the
    /// previous draw took. Ticks that fall behind run immediately.
    /// Stops at the first error; completed ticks stay applied.
    pub fn run<R>(
        &mut self,
        scene: &mut SceneGraph<R::Handle>,
        renderer: &mut R,
        count: u64,
    ) -> SceneResult<usize>
    where
        R: Renderer,
    {
        info!(
            ticks = count,
            interval_ms = self.interval.as_millis() as u64,
            "starting animation"
        );
        let mut drawn = 0;
        let mut deadline = Instant::now();
        for i in 0..count {
            if i > 0 {
                deadline += self.interval;
                let wait = deadline.saturating_duration_since(Instant::now());
                if !wait.is_zero() {
                    thread::sleep(wait);
                }
            }
            match self.tick(scene, renderer) {
                Ok(count) => drawn += count,
                Err(err) => {
                    warn!(tick = self.ticks + 1, %err, "animation stopped");
                    return Err(err);
                }
            }
        }
        Ok(drawn)
    }
}
