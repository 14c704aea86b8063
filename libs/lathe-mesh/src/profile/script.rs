//! # Profile Scripts
//!
//! Profiles authored as data. A script is an ordered list of `line` and
//! `curve` operations replayed through [`ProfileBuilder`](super::ProfileBuilder).
//!
//! ```json
//! {
//!   "ops": [
//!     { "op": "line", "from": [0.0, 0.0], "to": [1.0, 0.0], "color": [0.5, 0.1, 0.1, 1.0] },
//!     { "op": "curve", "from": [1.0, 0.0], "to": [0.0, 2.0], "control": [1.0, 2.0],
//!       "color": [0.1, 0.4, 0.1, 1.0], "depth": 3, "normal_scale": -1.0 }
//!   ]
//! }
//! ```
//!
//! `color` may be omitted and falls back to [`DEFAULT_COLOR`].

use crate::color::Rgba;
use crate::error::MeshResult;
use config::constants::DEFAULT_COLOR;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One profile-building operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProfileOp {
    /// Straight segment, see [`ProfileBuilder::line`](super::ProfileBuilder::line)
    Line {
        from: DVec2,
        to: DVec2,
        #[serde(default = "default_color")]
        color: Rgba,
    },
    /// Subdivided curve, see [`ProfileBuilder::curve`](super::ProfileBuilder::curve)
    Curve {
        from: DVec2,
        to: DVec2,
        control: DVec2,
        #[serde(default = "default_color")]
        color: Rgba,
        depth: u32,
        normal_scale: f64,
    },
}

fn default_color() -> Rgba {
    DEFAULT_COLOR
}

/// An ordered list of profile operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileScript {
    pub ops: Vec<ProfileOp>,
}

impl ProfileScript {
    /// Parses a script from JSON.
    pub fn from_json(source: &str) -> MeshResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serializes the script as pretty-printed JSON.
    pub fn to_json(&self) -> MeshResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of samples the script appends when replayed.
    pub fn sample_count(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                ProfileOp::Line { .. } => 2,
                ProfileOp::Curve { depth, .. } => 1usize
                    .checked_shl(*depth)
                    .map_or(usize::MAX, |n| n.saturating_add(1)),
            })
            .fold(0usize, usize::saturating_add)
    }
}
