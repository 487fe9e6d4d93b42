//! Region adjacency graphs built from watershed label images.
//!
//! Vertex ids equal label values: vertex `0` stands for the watershed line and
//! basins `1..=region_count` map to vertices of the same id. Two basins are
//! adjacent when their pixels touch under the chosen connectivity, or when a
//! watershed-line pixel has both of them in its neighborhood.
//!
//! Vertex positions are kept apart from the topology in [`VertexCoordinates`],
//! indexed by vertex id.

mod build;
mod error;
mod graph;

pub use build::{build_adjacency_graph, compute_mass_centers};
pub use error::GraphError;
pub use graph::{EdgeId, GraphEdge, RegionGraph, Vertex, VertexCoordinates, VertexId};
