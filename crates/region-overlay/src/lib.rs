//! Umbrella crate for the `region-overlay` workspace.
//!
//! Re-exports the building blocks and adds the [`pipeline`] that chains them:
//! area closing, watershed flooding, region adjacency graph, edge metrics and
//! the selective overlay.

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{PipelineReport, RegionAnalysis, analyze, annotate, annotate_with, run};

pub use rag_core::*;
pub use rag_edges::*;
pub use rag_graph::*;
pub use rag_morph::*;
