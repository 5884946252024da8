use crate::algo::GridOptions;
use crate::graph::{Graph, LayoutResult, Point};

/// Row-major cells in node order. Works on any graph, including duplicate ids and dangling
/// edges, since edges are ignored.
pub fn layout(graph: &Graph, opts: &GridOptions) -> LayoutResult {
    let n = graph.nodes.len();
    if n == 0 {
        return LayoutResult::default();
    }

    let cols = opts
        .columns
        .unwrap_or_else(|| (n as f64).sqrt().ceil() as usize)
        .max(1);
    let (max_w, max_h) = graph.max_node_size();
    let cell_w = max_w + opts.spacing.max(0.0);
    let cell_h = max_h + opts.spacing.max(0.0);

    let positions = (0..n)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            Point::new(
                col as f64 * cell_w + cell_w / 2.0,
                row as f64 * cell_h + cell_h / 2.0,
            )
        })
        .collect();
    LayoutResult { positions }
}
