use log::debug;
use rag_core::{ImageViewMut, LineRasterizer, Pixel, Point2d};
use rag_graph::{RegionGraph, VertexCoordinates};

use crate::{EdgeError, EdgeMetrics};

/// Angle (radians) below which an edge is drawn.
pub const DEFAULT_ANGLE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlaySummary {
    pub edges_drawn: usize,
    pub pixels_stamped: usize,
}

/// Draws every edge with `angle < threshold` into `image`, stamping
/// `edge_id + 1` so that edge 0 stays distinct from a zero background.
///
/// All selected edges are validated before the first pixel is written; on
/// error the image is left untouched. Edges are drawn in id order, so where
/// lines cross the higher id wins.
pub fn render_overlay<T: Pixel, R: LineRasterizer>(
    image: &mut ImageViewMut<'_, T>,
    graph: &RegionGraph,
    metrics: &EdgeMetrics,
    coordinates: &VertexCoordinates,
    threshold: f64,
    rasterizer: &R,
) -> Result<OverlaySummary, EdgeError> {
    if metrics.len() != graph.num_edges() {
        return Err(EdgeError::MetricsMismatch {
            expected: graph.num_edges(),
            actual: metrics.len(),
        });
    }

    let mut plan: Vec<(Point2d, Point2d, T)> = Vec::new();
    for id in metrics.selected(threshold) {
        let Some(e) = graph.edge(id) else {
            return Err(EdgeError::MetricsMismatch {
                expected: graph.num_edges(),
                actual: metrics.len(),
            });
        };

        let pa = coordinates.get(e.a).ok_or(EdgeError::MissingVertex {
            edge: e.id,
            vertex: e.a,
        })?;
        let pb = coordinates.get(e.b).ok_or(EdgeError::MissingVertex {
            edge: e.id,
            vertex: e.b,
        })?;

        let stamp = e.id + 1;
        let value = T::from_stamp(stamp).ok_or(EdgeError::StampOverflow {
            edge: e.id,
            stamp,
        })?;
        plan.push((pa, pb, value));
    }

    let mut summary = OverlaySummary::default();
    for (pa, pb, value) in plan {
        summary.pixels_stamped += rasterizer.draw_line(image, pa, pb, value);
        summary.edges_drawn += 1;
    }

    debug!(
        "render_overlay: drew {}/{} edges, {} pixels (threshold={threshold})",
        summary.edges_drawn,
        graph.num_edges(),
        summary.pixels_stamped
    );
    Ok(summary)
}
