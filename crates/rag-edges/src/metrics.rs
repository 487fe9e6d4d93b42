use core::f64::consts::FRAC_PI_2;
use core::ops::Index;

use log::debug;
use rag_core::Point2d;
use rag_graph::{EdgeId, RegionGraph, VertexCoordinates};
use serde::{Deserialize, Serialize};

use crate::EdgeError;

/// What to do with an edge whose endpoints share a column (`dx == 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Treat the edge as perfectly vertical: `angle = pi/2`.
    #[default]
    Vertical,
    /// Fail with [`EdgeError::DegenerateEdge`].
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeMetric {
    /// `dy^2 + dx^2`, not normalized.
    pub squared_distance: f64,
    /// `|atan(dy / dx)|` in radians.
    pub angle: f64,
}

/// Metric of the segment `a -> b`. Returns `None` only for a degenerate
/// segment under [`DegeneratePolicy::Reject`].
pub fn edge_metric(a: Point2d, b: Point2d, policy: DegeneratePolicy) -> Option<EdgeMetric> {
    let d = (a - b).abs();
    let (dx, dy) = (d.x, d.y);

    let angle = if dx == 0.0 {
        match policy {
            DegeneratePolicy::Vertical => FRAC_PI_2,
            DegeneratePolicy::Reject => return None,
        }
    } else {
        (dy / dx).atan().abs()
    };

    Some(EdgeMetric {
        squared_distance: dy * dy + dx * dx,
        angle,
    })
}

/// Dense metric table; entry `i` belongs to edge id `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeMetrics {
    values: Vec<EdgeMetric>,
}

impl EdgeMetrics {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, id: EdgeId) -> Option<&EdgeMetric> {
        self.values.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &EdgeMetric)> {
        self.values.iter().enumerate()
    }

    /// Edge ids whose angle is strictly below `threshold`.
    pub fn selected(&self, threshold: f64) -> impl Iterator<Item = EdgeId> + '_ {
        self.iter()
            .filter(move |(_, m)| m.angle < threshold)
            .map(|(id, _)| id)
    }
}

impl Index<EdgeId> for EdgeMetrics {
    type Output = EdgeMetric;

    fn index(&self, id: EdgeId) -> &Self::Output {
        &self.values[id]
    }
}

/// Computes the metric of every edge in `graph`.
///
/// Fails on the first edge whose endpoint has no coordinate, and on
/// degenerate edges when `policy` is [`DegeneratePolicy::Reject`].
pub fn compute_edge_metrics(
    graph: &RegionGraph,
    coordinates: &VertexCoordinates,
    policy: DegeneratePolicy,
) -> Result<EdgeMetrics, EdgeError> {
    let mut values = Vec::with_capacity(graph.num_edges());

    for e in graph.iter_edges() {
        debug_assert_eq!(e.id, values.len(), "edge ids must be dense and ordered");

        let pa = coordinates.get(e.a).ok_or(EdgeError::MissingVertex {
            edge: e.id,
            vertex: e.a,
        })?;
        let pb = coordinates.get(e.b).ok_or(EdgeError::MissingVertex {
            edge: e.id,
            vertex: e.b,
        })?;

        let m = edge_metric(pa, pb, policy).ok_or(EdgeError::DegenerateEdge { edge: e.id })?;
        values.push(m);
    }

    debug!("compute_edge_metrics: {} edges", values.len());
    Ok(EdgeMetrics { values })
}
