//! Image in, annotated image out.
//!
//! Stages: optional gradient, area closing, watershed flooding, region
//! adjacency graph with mass centers, edge metrics, selective overlay. Each
//! stage only reads the previous stage's output; the overlay is the only step
//! that writes into the caller's image.

use log::{debug, info};
use rag_core::{Bresenham, Image, ImageView, LineRasterizer, Pixel};
use rag_edges::{EdgeMetrics, OverlaySummary, compute_edge_metrics, render_overlay};
use rag_graph::{RegionGraph, VertexCoordinates, build_adjacency_graph, compute_mass_centers};
use rag_morph::{Segmentation, morphological_gradient, segment};

use crate::{PipelineConfig, PipelineError};

/// Everything computed before the overlay is drawn.
#[derive(Debug, Clone)]
pub struct RegionAnalysis {
    pub segmentation: Segmentation,
    pub graph: RegionGraph,
    pub coordinates: VertexCoordinates,
    pub metrics: EdgeMetrics,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub analysis: RegionAnalysis,
    pub overlay: OverlaySummary,
}

impl PipelineReport {
    pub fn region_count(&self) -> usize {
        self.analysis.segmentation.region_count
    }

    /// `region_count + 1`: the watershed line is vertex 0.
    pub fn vertex_count(&self) -> usize {
        self.analysis.graph.num_vertices()
    }

    pub fn edge_count(&self) -> usize {
        self.analysis.graph.num_edges()
    }

    pub fn metrics(&self) -> &EdgeMetrics {
        &self.analysis.metrics
    }
}

/// Segments `image` and computes the region graph with its edge metrics.
pub fn analyze<T: Pixel>(
    image: &ImageView<'_, T>,
    cfg: &PipelineConfig,
) -> Result<RegionAnalysis, PipelineError> {
    cfg.validate()?;

    let segmentation = if cfg.apply_gradient {
        let grad = morphological_gradient(image, cfg.connectivity);
        debug!("pipeline: gradient done");
        segment(&grad.as_view(), cfg.connectivity, cfg.area_threshold)
    } else {
        segment(image, cfg.connectivity, cfg.area_threshold)
    };
    info!("pipeline: {} regions", segmentation.region_count);

    let labels = segmentation.labels.as_view();
    let graph = build_adjacency_graph(&labels, cfg.connectivity, segmentation.region_count)?;
    let coordinates = compute_mass_centers(&labels, segmentation.region_count, &graph)?;
    debug!("pipeline: mass centers done");

    let metrics = compute_edge_metrics(&graph, &coordinates, cfg.degenerate_policy)?;
    debug!("pipeline: edge metrics done");

    Ok(RegionAnalysis {
        segmentation,
        graph,
        coordinates,
        metrics,
    })
}

/// Runs the full pipeline and draws the overlay into `image` in place.
pub fn annotate<T: Pixel>(
    image: &mut Image<T>,
    cfg: &PipelineConfig,
) -> Result<PipelineReport, PipelineError> {
    annotate_with(image, cfg, &Bresenham)
}

/// [`annotate`] with a caller-supplied line rasterizer.
pub fn annotate_with<T: Pixel, R: LineRasterizer>(
    image: &mut Image<T>,
    cfg: &PipelineConfig,
    rasterizer: &R,
) -> Result<PipelineReport, PipelineError> {
    let analysis = analyze(&image.as_view(), cfg)?;

    let overlay = render_overlay(
        &mut image.as_view_mut(),
        &analysis.graph,
        &analysis.metrics,
        &analysis.coordinates,
        cfg.angle_threshold,
        rasterizer,
    )?;
    debug!("pipeline: overlay done");

    Ok(PipelineReport { analysis, overlay })
}

/// Owning variant of [`annotate`].
pub fn run<T: Pixel>(
    mut image: Image<T>,
    cfg: &PipelineConfig,
) -> Result<(Image<T>, PipelineReport), PipelineError> {
    let report = annotate(&mut image, cfg)?;
    Ok((image, report))
}
