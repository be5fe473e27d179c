use std::io::Read;

use serde::{Deserialize, Serialize};

/// What the coincidence guard does once its retries are spent and the
/// candidate segment still runs on top of an earlier one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoincidenceFallback {
    /// Keep the last shifted position and carry on.
    #[default]
    AcceptLast,
    /// Stop the branch; it is reported as partial.
    Abandon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Distance between neighbouring anchors, also the coincidence threshold
    /// and the size of one coincidence shift.
    pub point_spacing: i32,
    /// Gap kept between a route and the edges of a barrier.
    pub barrier_clearance: i32,
    /// Distance from a corner at which an anchor walk resumes on the next edge.
    pub edge_gap: i32,
    /// A branch holding more waypoints than this gives up.
    pub max_steps: usize,
    pub max_coincidence_retries: usize,
    pub coincidence_fallback: CoincidenceFallback,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            point_spacing: 10,
            barrier_clearance: 10,
            edge_gap: 10,
            max_steps: 13,
            max_coincidence_retries: 6,
            coincidence_fallback: CoincidenceFallback::AcceptLast,
        }
    }
}

impl RouterOptions {
    /// Reads options from JSON. Missing fields keep their defaults.
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
