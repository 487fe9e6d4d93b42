use rag_graph::{EdgeId, VertexId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeError {
    #[error("edge {edge} references vertex {vertex} which has no coordinate")]
    MissingVertex { edge: EdgeId, vertex: VertexId },

    #[error("edge {edge} has no horizontal extent; its angle is undefined")]
    DegenerateEdge { edge: EdgeId },

    #[error("metric table has {actual} entries but the graph has {expected} edges")]
    MetricsMismatch { expected: usize, actual: usize },

    #[error("stamp {stamp} for edge {edge} does not fit the pixel type")]
    StampOverflow { edge: EdgeId, stamp: usize },
}
