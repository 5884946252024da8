use crate::algo::LayeredOptions;
use crate::error::Result;
use crate::graph::{Adjacency, Graph, LayoutResult, Point};
use indexmap::IndexSet;
use std::collections::VecDeque;

/// Breadth-first levels, one row per level, rows centered on x = 0.
///
/// Directed mode roots at nodes without incoming edges and follows edges forward; undirected
/// mode roots every connected component at its highest-degree node. Nodes left unreached (a
/// directed cycle with no entry point) seed further traversals in document order.
pub fn layout(graph: &Graph, opts: &LayeredOptions) -> Result<LayoutResult> {
    let adj = graph.adjacency()?;
    let n = adj.len();
    if n == 0 {
        return Ok(LayoutResult::default());
    }

    let depth = assign_depths(&adj, opts.directed);

    let max_depth = depth.iter().copied().max().unwrap_or(0);
    let mut levels: Vec<Vec<usize>> = vec![Vec::new(); max_depth + 1];
    for (idx, &d) in depth.iter().enumerate() {
        levels[d].push(idx);
    }

    let (max_w, max_h) = graph.max_node_size();
    let col = max_w + opts.node_spacing.max(0.0);
    let row = max_h + opts.rank_spacing.max(0.0);

    let mut positions = vec![Point::default(); n];
    for (d, level) in levels.iter().enumerate() {
        let half = (level.len() as f64 - 1.0) / 2.0;
        for (i, &idx) in level.iter().enumerate() {
            positions[idx] = Point::new((i as f64 - half) * col, d as f64 * row);
        }
    }
    Ok(LayoutResult { positions })
}

fn assign_depths(adj: &Adjacency, directed: bool) -> Vec<usize> {
    let n = adj.len();
    let roots: IndexSet<usize> = if directed {
        (0..n).filter(|&i| adj.in_degree[i] == 0).collect()
    } else {
        component_roots(adj)
    };

    let mut depth: Vec<Option<usize>> = vec![None; n];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut pending = roots.into_iter().chain(0..n);
    loop {
        if queue.is_empty() {
            let Some(next) = pending.find(|&i| depth[i].is_none()) else {
                break;
            };
            depth[next] = Some(0);
            queue.push_back(next);
        }
        while let Some(cur) = queue.pop_front() {
            let d = depth[cur].unwrap_or(0);
            let next = if directed {
                &adj.successors[cur]
            } else {
                &adj.neighbors[cur]
            };
            for &m in next {
                if depth[m].is_none() {
                    depth[m] = Some(d + 1);
                    queue.push_back(m);
                }
            }
        }
    }
    depth.into_iter().map(|d| d.unwrap_or(0)).collect()
}

/// First highest-degree node of every connected component, in document order of discovery.
fn component_roots(adj: &Adjacency) -> IndexSet<usize> {
    let n = adj.len();
    let mut seen = vec![false; n];
    let mut roots = IndexSet::new();
    for start in 0..n {
        if seen[start] {
            continue;
        }
        let mut best = start;
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(cur) = stack.pop() {
            if adj.degree[cur] > adj.degree[best]
                || (adj.degree[cur] == adj.degree[best] && cur < best)
            {
                best = cur;
            }
            for &m in &adj.neighbors[cur] {
                if !seen[m] {
                    seen[m] = true;
                    stack.push(m);
                }
            }
        }
        roots.insert(best);
    }
    roots
}
