use crate::viewport::{Bounds, Viewport};
use rustc_hash::FxHashMap;
use trellis_core::Attributes;
use trellis_layout::{LayoutKind, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: String,
    pub label: String,
    /// `label` wrapped to the style's text max width.
    pub label_lines: Vec<String>,
    pub label_width: f64,
    pub label_height: f64,
    pub attributes: Attributes,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub selected: bool,
    /// Stand-in for an edge endpoint that names no node.
    pub placeholder: bool,
}

impl SceneNode {
    pub fn bounds(&self) -> Bounds {
        let hw = self.width.max(self.label_width) / 2.0;
        let hh = self.height.max(self.label_height) / 2.0;
        Bounds {
            min_x: self.position.x - hw,
            min_y: self.position.y - hh,
            max_x: self.position.x + hw,
            max_y: self.position.y + hh,
        }
    }

    /// Point-in-ellipse test against the node body (labels are not clickable).
    pub fn contains(&self, p: Point) -> bool {
        let rx = (self.width / 2.0).max(f64::EPSILON);
        let ry = (self.height / 2.0).max(f64::EPSILON);
        let dx = (p.x - self.position.x) / rx;
        let dy = (p.y - self.position.y) / ry;
        dx * dx + dy * dy <= 1.0
    }

    /// Where the ray from the center towards `toward` leaves the node ellipse.
    fn boundary_towards(&self, toward: Point) -> Point {
        let dx = toward.x - self.position.x;
        let dy = toward.y - self.position.y;
        let rx = (self.width / 2.0).max(f64::EPSILON);
        let ry = (self.height / 2.0).max(f64::EPSILON);
        let k = ((dx / rx).powi(2) + (dy / ry).powi(2)).sqrt();
        if k <= 1.0 {
            return self.position;
        }
        Point::new(self.position.x + dx / k, self.position.y + dy / k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowShape {
    None,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeShape {
    Straight,
    /// Quadratic curve whose midpoint sits `offset` units left of the source -> target line.
    Curved { offset: f64 },
    Loop { size: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    /// Index into [`Scene::nodes`].
    pub source: usize,
    pub target: usize,
    pub source_id: String,
    pub target_id: String,
    pub directed: bool,
    /// At least one endpoint is a placeholder.
    pub dangling: bool,
    pub attributes: Attributes,
    pub shape: EdgeShape,
}

impl SceneEdge {
    pub fn arrow(&self) -> ArrowShape {
        if self.directed {
            ArrowShape::Triangle
        } else {
            ArrowShape::None
        }
    }
}

/// Drawable path of an edge in model coordinates, clipped to the endpoint ellipses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePath {
    Line {
        start: Point,
        end: Point,
    },
    Quadratic {
        start: Point,
        control: Point,
        end: Point,
    },
    Cubic {
        start: Point,
        c1: Point,
        c2: Point,
        end: Point,
    },
}

impl EdgePath {
    pub fn end(&self) -> Point {
        match *self {
            EdgePath::Line { end, .. }
            | EdgePath::Quadratic { end, .. }
            | EdgePath::Cubic { end, .. } => end,
        }
    }

    fn points(&self) -> Vec<Point> {
        match *self {
            EdgePath::Line { start, end } => vec![start, end],
            EdgePath::Quadratic {
                start,
                control,
                end,
            } => vec![start, control, end],
            EdgePath::Cubic { start, c1, c2, end } => vec![start, c1, c2, end],
        }
    }
}

/// The rendered state of one graph: elements, their positions, and the viewer state around them.
#[derive(Debug, Clone)]
pub struct Scene {
    pub(crate) nodes: Vec<SceneNode>,
    pub(crate) edges: Vec<SceneEdge>,
    pub(crate) viewport: Viewport,
    pub(crate) layout_name: String,
    pub(crate) applied_layout: LayoutKind,
    pub(crate) status: Option<String>,
    pub(crate) default_directed: bool,
}

impl Scene {
    pub(crate) fn new(viewport: Viewport, layout_name: String) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport,
            layout_name,
            applied_layout: LayoutKind::Grid,
            status: None,
            default_directed: false,
        }
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Layout name as requested, even when it could not be honored.
    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    /// Algorithm that actually produced the positions.
    pub fn applied_layout(&self) -> LayoutKind {
        self.applied_layout
    }

    pub fn default_directed(&self) -> bool {
        self.default_directed
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: Option<String>) {
        self.status = status;
    }

    /// First element carrying `id`, placeholders included.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.placeholder).count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.placeholder).count()
    }

    pub fn selected(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.nodes.iter().filter(|n| n.selected)
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "nodes: {}  edges: {}  default: {}",
            self.node_count(),
            self.edges.len(),
            if self.default_directed {
                "directed"
            } else {
                "undirected"
            }
        );
        let missing = self.placeholder_count();
        if missing > 0 {
            out.push_str(&format!("  missing: {missing}"));
        }
        out
    }

    /// Model-space extent of every element, labels and loops included.
    pub fn bounds(&self) -> Option<Bounds> {
        let node_corners = self.nodes.iter().flat_map(|n| {
            let b = n.bounds();
            [(b.min_x, b.min_y), (b.max_x, b.max_y)]
        });
        let edge_points = self
            .edges
            .iter()
            .flat_map(|e| self.edge_path(e).points())
            .map(|p| (p.x, p.y));
        Bounds::from_points(node_corners.chain(edge_points))
    }

    pub fn edge_path(&self, edge: &SceneEdge) -> EdgePath {
        let s = &self.nodes[edge.source];
        let t = &self.nodes[edge.target];
        match edge.shape {
            EdgeShape::Straight => EdgePath::Line {
                start: s.boundary_towards(t.position),
                end: t.boundary_towards(s.position),
            },
            EdgeShape::Curved { offset } => {
                let (a, b) = (s.position, t.position);
                let (dx, dy) = (b.x - a.x, b.y - a.y);
                let len = (dx * dx + dy * dy).sqrt();
                let (nx, ny) = if len > 0.0 {
                    (dy / len, -dx / len)
                } else {
                    (0.0, -1.0)
                };
                // A quadratic passes through half of its control point's offset.
                let control = Point::new(
                    (a.x + b.x) / 2.0 + nx * offset * 2.0,
                    (a.y + b.y) / 2.0 + ny * offset * 2.0,
                );
                EdgePath::Quadratic {
                    start: s.boundary_towards(control),
                    control,
                    end: t.boundary_towards(control),
                }
            }
            EdgeShape::Loop { size } => {
                let p = s.position;
                let top = p.y - s.height / 2.0;
                let c1 = Point::new(p.x - size, top - size * 2.0);
                let c2 = Point::new(p.x + size, top - size * 2.0);
                EdgePath::Cubic {
                    start: s.boundary_towards(c1),
                    c1,
                    c2,
                    end: s.boundary_towards(c2),
                }
            }
        }
    }

    /// Topmost node under a screen position.
    pub fn node_at(&self, screen_x: f64, screen_y: f64) -> Option<&SceneNode> {
        let p = self.viewport.to_model(screen_x, screen_y);
        self.nodes.iter().rev().find(|n| n.contains(p))
    }

    pub fn fit(&mut self) {
        let bounds = self.bounds();
        self.viewport.fit(bounds);
    }

    pub fn center_on(&mut self, p: Point) {
        self.viewport.center_on(p);
    }

    pub fn center_on_node(&mut self, index: usize) {
        if let Some(p) = self.nodes.get(index).map(|n| n.position) {
            self.viewport.center_on(p);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
    }

    pub fn clear_selection(&mut self) {
        for n in &mut self.nodes {
            n.selected = false;
        }
    }

    /// Replaces the selection with every real node whose id contains `query` and centers on the
    /// first of them. An empty query only clears. Returns the number of selected nodes.
    pub fn select_matching(&mut self, query: &str) -> usize {
        self.clear_selection();
        if query.is_empty() {
            return 0;
        }
        let mut first = None;
        let mut count = 0;
        for (i, n) in self.nodes.iter_mut().enumerate() {
            if !n.placeholder && n.id.contains(query) {
                n.selected = true;
                first.get_or_insert(i);
                count += 1;
            }
        }
        if let Some(i) = first {
            self.center_on_node(i);
        }
        count
    }

    /// Layout input with index-based ids, so duplicate node ids still lay out.
    pub(crate) fn layout_graph(&self) -> trellis_layout::Graph {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| trellis_layout::Node {
                id: format!("n{i}"),
                width: n.width.max(n.label_width),
                height: n.height.max(n.label_height),
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| trellis_layout::Edge {
                id: format!("e{i}"),
                source: format!("n{}", e.source),
                target: format!("n{}", e.target),
            })
            .collect();
        trellis_layout::Graph { nodes, edges }
    }

    pub(crate) fn set_positions(&mut self, positions: &[Point]) {
        for (n, p) in self.nodes.iter_mut().zip(positions) {
            n.position = *p;
        }
    }
}

/// Curvature for parallel edges and loop sizes for repeated self-loops.
///
/// Offsets are spread symmetrically around the straight line and expressed relative to each
/// edge's own direction, so `a -> b` and `b -> a` never overlap.
pub(crate) fn assign_shapes(edges: &mut [SceneEdge], spacing: f64, loop_size: f64) {
    let mut groups: FxHashMap<(usize, usize), Vec<usize>> = FxHashMap::default();
    for (i, e) in edges.iter().enumerate() {
        let key = (e.source.min(e.target), e.source.max(e.target));
        groups.entry(key).or_default().push(i);
    }
    for ((lo, hi), members) in groups {
        if lo == hi {
            for (k, &i) in members.iter().enumerate() {
                edges[i].shape = EdgeShape::Loop {
                    size: loop_size * (k + 1) as f64,
                };
            }
            continue;
        }
        if members.len() < 2 {
            continue;
        }
        let mid = (members.len() - 1) as f64 / 2.0;
        for (k, &i) in members.iter().enumerate() {
            let mut offset = (k as f64 - mid) * spacing;
            if edges[i].source != lo {
                offset = -offset;
            }
            edges[i].shape = if offset == 0.0 {
                EdgeShape::Straight
            } else {
                EdgeShape::Curved { offset }
            };
        }
    }
}
