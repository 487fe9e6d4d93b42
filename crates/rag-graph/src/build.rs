use std::collections::BTreeSet;

use log::debug;
use rag_core::{Connectivity, ImageView, Point2d};

use crate::error::GraphError;
use crate::graph::{RegionGraph, VertexCoordinates, VertexId};

const LINE: u32 = 0;

/// Region adjacency graph of a watershed label image.
///
/// Produces `region_count + 1` vertices (vertex `0` is the watershed line) and
/// one edge per adjacent basin pair. Labels above `region_count` are rejected.
pub fn build_adjacency_graph(
    labels: &ImageView<'_, u32>,
    connectivity: Connectivity,
    region_count: usize,
) -> Result<RegionGraph, GraphError> {
    let (w, h) = labels.dimensions();
    let mut areas = vec![0_usize; region_count + 1];
    let mut pairs = BTreeSet::new();
    let mut around = Vec::with_capacity(8);

    for y in 0..h {
        for (x, &l) in labels.row(y).iter().enumerate() {
            let v = vertex_of(l, x, y, region_count)?;
            areas[v] += 1;

            around.clear();
            for &(dx, dy) in connectivity.offsets() {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx >= w || ny >= h {
                    continue;
                }
                let Some(&m) = labels.get(nx, ny) else {
                    continue;
                };
                let u = vertex_of(m, nx, ny, region_count)?;
                if u != 0 && !around.contains(&u) {
                    around.push(u);
                }
            }

            if l == LINE {
                for (i, &a) in around.iter().enumerate() {
                    for &b in &around[i + 1..] {
                        pairs.insert((a.min(b), a.max(b)));
                    }
                }
            } else {
                for &u in &around {
                    if u != v {
                        pairs.insert((v.min(u), v.max(u)));
                    }
                }
            }
        }
    }

    let graph = RegionGraph::from_pairs(&areas, pairs);
    debug!(
        "build_adjacency_graph: {} vertices, {} edges ({})",
        graph.num_vertices(),
        graph.num_edges(),
        connectivity.name()
    );
    Ok(graph)
}

/// Mean pixel position of every vertex's region.
///
/// Vertices whose region has no pixels get no coordinate.
pub fn compute_mass_centers(
    labels: &ImageView<'_, u32>,
    region_count: usize,
    graph: &RegionGraph,
) -> Result<VertexCoordinates, GraphError> {
    if graph.num_vertices() != region_count + 1 {
        return Err(GraphError::VertexCountMismatch {
            graph: graph.num_vertices(),
            expected: region_count + 1,
        });
    }

    let mut sums = vec![(0.0_f64, 0.0_f64, 0_usize); region_count + 1];
    for y in 0..labels.height() {
        for (x, &l) in labels.row(y).iter().enumerate() {
            let v = vertex_of(l, x, y, region_count)?;
            let s = &mut sums[v];
            s.0 += x as f64;
            s.1 += y as f64;
            s.2 += 1;
        }
    }

    let points = sums
        .into_iter()
        .map(|(sx, sy, n)| (n > 0).then(|| Point2d::new(sx / n as f64, sy / n as f64)))
        .collect();

    debug!("compute_mass_centers: done for {} vertices", region_count + 1);
    Ok(VertexCoordinates::new(points))
}

#[inline]
fn vertex_of(label: u32, x: usize, y: usize, region_count: usize) -> Result<VertexId, GraphError> {
    let v = label as usize;
    if v > region_count {
        return Err(GraphError::LabelOutOfRange {
            label,
            x,
            y,
            region_count,
        });
    }
    Ok(v)
}
