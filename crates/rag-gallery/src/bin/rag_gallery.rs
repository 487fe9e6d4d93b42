use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use log::info;
use region_overlay::{
    Connectivity, Image, PipelineConfig, RegionAnalysis, WATERSHED_LINE, analyze, annotate,
    superpose_watershed,
};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "rag_gallery")]
#[command(about = "Run region-overlay stages on an image and write the results to disk")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Area closing + watershed: label and watershed-line images
    #[command(name = "segment")]
    Segment(StageArgs),
    /// Region adjacency graph with mass centers and edge metrics as JSON
    #[command(name = "graph")]
    Graph(StageArgs),
    /// Full pipeline: annotated image with near-horizontal edges drawn
    #[command(name = "overlay")]
    Overlay(StageArgs),
}

#[derive(Args, Debug, Clone)]
struct StageArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// JSON file with `PipelineConfig` fields; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    area_threshold: Option<usize>,
    #[arg(long)]
    angle_threshold: Option<f64>,
    /// Use 8-connectivity instead of 4-connectivity
    #[arg(long, default_value_t = false)]
    c8: bool,
    /// Run a morphological gradient before segmenting
    #[arg(long, default_value_t = false)]
    gradient: bool,
}

#[derive(Debug, Clone, Serialize)]
struct MetaSegment {
    width: usize,
    height: usize,
    region_count: usize,
    watershed_pixels: usize,
    config: PipelineConfig,
}

#[derive(Debug, Clone, Serialize)]
struct VertexDto {
    id: usize,
    area: usize,
    center: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct EdgeDto {
    id: usize,
    a: usize,
    b: usize,
    squared_distance: f64,
    angle: f64,
    selected: bool,
}

#[derive(Debug, Clone, Serialize)]
struct GraphDto {
    width: usize,
    height: usize,
    vertices: Vec<VertexDto>,
    edges: Vec<EdgeDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaOverlay {
    region_count: usize,
    edge_count: usize,
    edges_drawn: usize,
    pixels_stamped: usize,
    config: PipelineConfig,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Segment(args) => run_segment(args),
        Command::Graph(args) => run_graph(args),
        Command::Overlay(args) => run_overlay(args),
    }
}

fn run_segment(args: StageArgs) -> Result<()> {
    let (out_dir, cfg) = prepare_stage(&args, "segment")?;
    let img = load_input_u8(&args.input)?;
    let analysis = run_analysis(&img, &cfg)?;
    let labels = &analysis.segmentation.labels;

    save_luma_raw(
        out_dir.join("labels.png"),
        labels.width(),
        labels.height(),
        labels_to_u8_vis(labels.data()),
    )?;

    let mut mask = Image::new_fill(img.width(), img.height(), 0u8);
    let watershed_pixels = superpose_watershed(&mut mask.as_view_mut(), &labels.as_view(), 255)
        .context("superposing watershed lines")?;
    save_rgb(
        out_dir.join("superpose.png"),
        superpose_rgb(&img, &mask, Rgb([255, 0, 0]))?,
    )?;

    write_json(
        out_dir.join("meta.json"),
        &MetaSegment {
            width: img.width(),
            height: img.height(),
            region_count: analysis.segmentation.region_count,
            watershed_pixels,
            config: cfg,
        },
    )
}

fn run_graph(args: StageArgs) -> Result<()> {
    let (out_dir, cfg) = prepare_stage(&args, "graph")?;
    let img = load_input_u8(&args.input)?;
    let analysis = run_analysis(&img, &cfg)?;

    let vertices = analysis
        .graph
        .vertices()
        .iter()
        .map(|v| VertexDto {
            id: v.id,
            area: v.area,
            center: analysis.coordinates.get(v.id).map(|p| [p.x, p.y]),
        })
        .collect::<Vec<_>>();

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
                selected: m.angle < cfg.angle_threshold,
            }
        })
        .collect::<Vec<_>>();

    info!(
        "graph: {} vertices, {} edges",
        vertices.len(),
        edges.len()
    );
    write_json(
        out_dir.join("graph.json"),
        &GraphDto {
            width: img.width(),
            height: img.height(),
            vertices,
            edges,
        },
    )
}

fn run_overlay(args: StageArgs) -> Result<()> {
    let (out_dir, cfg) = prepare_stage(&args, "overlay")?;
    let mut img = load_input_u16(&args.input)?;

    let meta = overlay_u16(&mut img, cfg)?;
    save_luma16(out_dir.join("overlay.png"), img)?;
    write_json(out_dir.join("meta.json"), &meta)
}

/// Stamps are `edge_id + 1`, so the overlay runs on 16-bit pixels to leave
/// room for up to 65535 edges.
fn overlay_u16(img: &mut Image<u16>, cfg: PipelineConfig) -> Result<MetaOverlay> {
    let report = annotate(img, &cfg).context("running region-overlay pipeline")?;
    info!(
        "overlay: {} of {} edges drawn",
        report.overlay.edges_drawn,
        report.edge_count()
    );

    Ok(MetaOverlay {
        region_count: report.region_count(),
        edge_count: report.edge_count(),
        edges_drawn: report.overlay.edges_drawn,
        pixels_stamped: report.overlay.pixels_stamped,
        config: cfg,
    })
}

fn prepare_stage(args: &StageArgs, stage: &str) -> Result<(PathBuf, PipelineConfig)> {
    ensure_file_exists(&args.input, "input")?;

    let mut cfg = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json::<PipelineConfig>(path)
                .with_context(|| format!("reading config json at {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };
    if let Some(v) = args.area_threshold {
        cfg.area_threshold = v;
    }
    if let Some(v) = args.angle_threshold {
        cfg.angle_threshold = v;
    }
    if args.c8 {
        cfg.connectivity = Connectivity::C8;
    }
    if args.gradient {
        cfg.apply_gradient = true;
    }

    let out_dir = args.out.join(stage);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    Ok((out_dir, cfg))
}

fn run_analysis(img: &Image<u8>, cfg: &PipelineConfig) -> Result<RegionAnalysis> {
    let analysis = analyze(&img.as_view(), cfg).context("analyzing regions")?;
    info!(
        "{} regions, {} edges",
        analysis.segmentation.region_count,
        analysis.graph.num_edges()
    );
    Ok(analysis)
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn load_input_u16(path: &Path) -> Result<Image<u16>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.into_luma16();
    let (w, h) = luma.dimensions();

    Image::from_vec(w as usize, h as usize, luma.into_raw())
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn save_luma16(path: PathBuf, img: Image<u16>) -> Result<()> {
    let (w, h) = img.dimensions();
    let buf: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(w as u32, h as u32, img.into_vec())
            .context("constructing 16-bit output buffer")?;
    buf.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn save_luma_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn save_rgb(path: PathBuf, img: RgbImage) -> Result<()> {
    img.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

/// Spreads labels over the gray range; watershed lines stay black.
fn labels_to_u8_vis(labels: &[u32]) -> Vec<u8> {
    labels
        .iter()
        .map(|&l| {
            if l == WATERSHED_LINE {
                0
            } else {
                (64 + (l.wrapping_mul(37) % 192)) as u8
            }
        })
        .collect()
}

fn superpose_rgb(input: &Image<u8>, mask: &Image<u8>, color: Rgb<u8>) -> Result<RgbImage> {
    if input.dimensions() != mask.dimensions() {
        bail!(
            "mask dimensions {:?} do not match input dimensions {:?}.",
            mask.dimensions(),
            input.dimensions()
        );
    }

    let gray = GrayImage::from_raw(
        input.width() as u32,
        input.height() as u32,
        input.data().to_vec(),
    )
    .context("constructing GrayImage from input")?;
    let mut rgb = image::DynamicImage::ImageLuma8(gray).to_rgb8();

    for (i, &m) in mask.data().iter().enumerate() {
        if m != 0 {
            let (x, y) = (i % input.width(), i / input.width());
            rgb.put_pixel(x as u32, y as u32, color);
        }
    }

    Ok(rgb)
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
