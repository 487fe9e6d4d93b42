use rag_core::Connectivity;
use rag_edges::{DEFAULT_ANGLE_THRESHOLD, DegeneratePolicy};
use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// Default area threshold (pixels) for the closing before flooding.
pub const DEFAULT_AREA_THRESHOLD: usize = 20;

/// Pipeline parameters. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minima covering fewer pixels than this are filled before flooding.
    pub area_threshold: usize,
    /// Structuring element for closing, flooding and adjacency.
    pub connectivity: Connectivity,
    /// Edges with an angle strictly below this (radians) are drawn.
    pub angle_threshold: f64,
    /// Run a morphological gradient first. Leave off when the input already
    /// is a gradient image.
    pub apply_gradient: bool,
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            area_threshold: DEFAULT_AREA_THRESHOLD,
            connectivity: Connectivity::C4,
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
            apply_gradient: false,
            degenerate_policy: DegeneratePolicy::Vertical,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.angle_threshold.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "angle_threshold must be finite, got {}",
                self.angle_threshold
            )));
        }
        Ok(())
    }
}
