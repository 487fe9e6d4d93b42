use rag_core::Point2d;

pub type VertexId = usize;
pub type EdgeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub id: VertexId,
    pub area: usize,
    pub incident_edges: Vec<EdgeId>,
}

/// Undirected edge with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub a: VertexId,
    pub b: VertexId,
}

/// Undirected graph with dense ids.
///
/// Edge `i` is stored at index `i`, so per-edge tables can be plain vectors.
/// [`RegionGraph::from_pairs`] is the only way to build one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionGraph {
    vertices: Vec<Vertex>,
    edges: Vec<GraphEdge>,
}

impl RegionGraph {
    /// Builds a graph from vertex areas and undirected vertex pairs.
    ///
    /// Pairs are normalized to `a < b`; self loops and duplicates are dropped.
    /// Edge ids follow the sorted order of the remaining pairs.
    ///
    /// # Panics
    /// Panics if a pair references a vertex outside `areas`.
    pub fn from_pairs(
        areas: &[usize],
        pairs: impl IntoIterator<Item = (VertexId, VertexId)>,
    ) -> Self {
        let mut vertices: Vec<Vertex> = areas
            .iter()
            .enumerate()
            .map(|(id, &area)| Vertex {
                id,
                area,
                incident_edges: Vec::new(),
            })
            .collect();

        let mut keyed: Vec<(VertexId, VertexId)> = pairs
            .into_iter()
            .filter(|(u, v)| u != v)
            .map(|(u, v)| (u.min(v), u.max(v)))
            .collect();
        keyed.sort_unstable();
        keyed.dedup();

        let mut edges = Vec::with_capacity(keyed.len());
        for (id, (a, b)) in keyed.into_iter().enumerate() {
            assert!(b < vertices.len(), "edge ({a}, {b}) references unknown vertex");
            vertices[a].incident_edges.push(id);
            vertices[b].incident_edges.push(id);
            edges.push(GraphEdge { id, a, b });
        }

        Self { vertices, edges }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.edges.get(id)
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    pub fn find_edge(&self, u: VertexId, v: VertexId) -> Option<&GraphEdge> {
        let (a, b) = (u.min(v), u.max(v));
        self.vertices
            .get(a)?
            .incident_edges
            .iter()
            .map(|&e| &self.edges[e])
            .find(|e| e.a == a && e.b == b)
    }

    /// Vertices sharing an edge with `v`.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .get(v)
            .map(|vx| vx.incident_edges.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&e| {
                let edge = &self.edges[e];
                if edge.a == v { edge.b } else { edge.a }
            })
    }
}

/// Per-vertex positions indexed by vertex id. Vertices without pixels have no
/// position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexCoordinates {
    points: Vec<Option<Point2d>>,
}

impl VertexCoordinates {
    pub fn new(points: Vec<Option<Point2d>>) -> Self {
        Self { points }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point2d>) -> Self {
        Self {
            points: points.into_iter().map(Some).collect(),
        }
    }

    pub fn get(&self, v: VertexId) -> Option<Point2d> {
        self.points.get(v).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
