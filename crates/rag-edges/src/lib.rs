//! Edge metrics and selective overlays for region adjacency graphs.
//!
//! Every edge gets an [`EdgeMetric`]: the squared distance between its two
//! vertex positions and the angle of the joining segment from the horizontal,
//! `|atan(dy / dx)|` in `[0, pi/2]`. Rows are the vertical axis and columns the
//! horizontal one, so `dy` compares rows and `dx` compares columns.
//!
//! [`render_overlay`] then stamps `edge_id + 1` along every edge whose angle is
//! below a threshold, which keeps near-horizontal neighbor relations and drops
//! near-vertical ones.

mod error;
mod metrics;
mod overlay;

pub use error::EdgeError;
pub use metrics::{DegeneratePolicy, EdgeMetric, EdgeMetrics, compute_edge_metrics, edge_metric};
pub use overlay::{DEFAULT_ANGLE_THRESHOLD, OverlaySummary, render_overlay};
