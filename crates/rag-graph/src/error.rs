use thiserror::Error;

/// Failures while turning a label image into a region graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("label {label} at ({x}, {y}) exceeds region count {region_count}")]
    LabelOutOfRange {
        label: u32,
        x: usize,
        y: usize,
        region_count: usize,
    },

    #[error("graph has {graph} vertices but the label image implies {expected}")]
    VertexCountMismatch { graph: usize, expected: usize },
}
