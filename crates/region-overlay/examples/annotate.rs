//! Example: overlay near-horizontal region adjacencies on a gray image.
//!
//! Loads a PNG as 16-bit grayscale, runs the region-overlay pipeline and writes
//! the annotated image next to the input together with a JSON file listing
//! every edge and its metric. 16-bit output leaves room for up to 65535 edge
//! stamps.
//!
//! Run from the workspace root:
//!   cargo run -p region-overlay --example annotate -- --help
//!   cargo run -p region-overlay --example annotate -- --input data/cells.png

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::{ImageBuffer, ImageReader, Luma};
use region_overlay::{Image, PipelineConfig, run};
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Draw near-horizontal watershed region adjacencies onto an image")]
struct Args {
    /// Input image (any format the `image` crate decodes)
    #[arg(long)]
    input: PathBuf,

    /// Minimum basin area kept by the area closing
    #[arg(long, default_value_t = 20)]
    area_threshold: usize,

    /// Edges whose angle from horizontal is below this (radians) are drawn
    #[arg(long, default_value_t = 0.6)]
    angle_threshold: f64,

    /// Output PNG path (default: <input stem>_overlay.png next to input)
    #[arg(long)]
    out: Option<PathBuf>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct EdgeDto {
    id: usize,
    a: usize,
    b: usize,
    squared_distance: f64,
    angle: f64,
    drawn: bool,
}

#[derive(Serialize)]
struct Summary {
    width: usize,
    height: usize,
    region_count: usize,
    elapsed_ms: f64,
    edges: Vec<EdgeDto>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let dir = input.parent().unwrap_or(Path::new("."));
    dir.join(format!("{stem}_{suffix}"))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let out_png = args
        .out
        .clone()
        .unwrap_or_else(|| sibling(&args.input, "overlay.png"));
    let out_json = out_png.with_extension("json");

    let gray = ImageReader::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?
        .decode()
        .with_context(|| format!("decoding {}", args.input.display()))?
        .into_luma16();
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    let img = Image::from_vec(w, h, gray.into_raw()).context("building input Image")?;

    let cfg = PipelineConfig {
        area_threshold: args.area_threshold,
        angle_threshold: args.angle_threshold,
        ..PipelineConfig::default()
    };

    let t0 = Instant::now();
    let (annotated, report) = run(img, &cfg).context("running pipeline")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    println!(
        "{}: {w}x{h}, {} regions, {} edges, {} drawn ({elapsed_ms:.2} ms)",
        args.input.display(),
        report.region_count(),
        report.edge_count(),
        report.overlay.edges_drawn
    );

    let buf: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(w as u32, h as u32, annotated.into_vec())
            .context("constructing 16-bit output buffer")?;
    buf.save(&out_png)
        .with_context(|| format!("saving {}", out_png.display()))?;

    let analysis = &report.analysis;
    let edges = analysis
        .graph
        .iter_edges()
        .map(|e| {
            let m = analysis.metrics[e.id];
            EdgeDto {
                id: e.id,
                a: e.a,
                b: e.b,
                squared_distance: m.squared_distance,
                angle: m.angle,
                drawn: m.angle < cfg.angle_threshold,
            }
        })
        .collect();

    let summary = Summary {
        width: w,
        height: h,
        region_count: report.region_count(),
        elapsed_ms,
        edges,
    };
    let out_file = std::fs::File::create(&out_json)
        .with_context(|| format!("creating {}", out_json.display()))?;
    serde_json::to_writer_pretty(out_file, &summary)
        .with_context(|| format!("writing JSON to {}", out_json.display()))?;

    println!("results written to {} and {}", out_png.display(), out_json.display());
    Ok(())
}
