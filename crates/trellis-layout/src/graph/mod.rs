use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Checks that node ids are unique and every edge endpoint names a node.
    ///
    /// Grid layout works on positions alone and skips this; every other algorithm needs it.
    pub fn validate(&self) -> Result<()> {
        self.adjacency().map(|_| ())
    }

    pub(crate) fn adjacency(&self) -> Result<Adjacency> {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, n) in self.nodes.iter().enumerate() {
            if index.insert(n.id.as_str(), i).is_some() {
                return Err(Error::DuplicateNode {
                    node_id: n.id.clone(),
                });
            }
        }

        let count = self.nodes.len();
        let mut adj = Adjacency {
            edges: Vec::with_capacity(self.edges.len()),
            neighbors: vec![Vec::new(); count],
            successors: vec![Vec::new(); count],
            in_degree: vec![0; count],
            degree: vec![0; count],
        };
        for e in &self.edges {
            let (Some(&s), Some(&t)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
            else {
                return Err(Error::MissingEndpoint {
                    edge_id: e.id.clone(),
                });
            };
            adj.edges.push((s, t));
            adj.degree[s] += 1;
            adj.degree[t] += 1;
            if s == t {
                continue;
            }
            adj.neighbors[s].push(t);
            adj.neighbors[t].push(s);
            adj.successors[s].push(t);
            adj.in_degree[t] += 1;
        }
        Ok(adj)
    }

    pub(crate) fn max_node_size(&self) -> (f64, f64) {
        self.nodes.iter().fold((0.0_f64, 0.0_f64), |(w, h), n| {
            (w.max(n.width), h.max(n.height))
        })
    }
}

/// Index-based view of a validated graph. Self-loops count towards `degree` (twice, like
/// Cytoscape) but never appear in `neighbors`/`successors`.
#[derive(Debug, Clone)]
pub(crate) struct Adjacency {
    pub(crate) edges: Vec<(usize, usize)>,
    pub(crate) neighbors: Vec<Vec<usize>>,
    pub(crate) successors: Vec<Vec<usize>>,
    pub(crate) in_degree: Vec<usize>,
    pub(crate) degree: Vec<usize>,
}

impl Adjacency {
    pub(crate) fn len(&self) -> usize {
        self.degree.len()
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Node centers, index-aligned with [`Graph::nodes`].
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub positions: Vec<Point>,
}
