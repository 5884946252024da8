use crate::algo::ConcentricOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point};

/// Rings by degree, highest degree innermost.
///
/// Nodes whose degree is within `max_degree / 4` of the first node of the current ring share
/// that ring. An edgeless graph gets a single ring.
pub fn layout(graph: &Graph, opts: &ConcentricOptions) -> Result<LayoutResult> {
    let adj = graph.adjacency()?;
    let n = adj.len();
    if n == 0 {
        return Ok(LayoutResult::default());
    }

    let mut order: Vec<usize> = (0..n).collect();
    // Stable: equal degrees keep document order.
    order.sort_by(|&a, &b| adj.degree[b].cmp(&adj.degree[a]));

    let level_width = adj.degree[order[0]] as f64 / 4.0;
    let mut levels: Vec<Vec<usize>> = Vec::new();
    for &idx in &order {
        let value = adj.degree[idx] as f64;
        let starts_new = match levels.last() {
            None => true,
            Some(level) => {
                let first = adj.degree[level[0]] as f64;
                level_width > 0.0 && (first - value).abs() >= level_width
            }
        };
        if starts_new {
            levels.push(vec![idx]);
        } else if let Some(level) = levels.last_mut() {
            level.push(idx);
        }
    }

    let (max_w, max_h) = graph.max_node_size();
    let min_dist = max_w.max(max_h) + opts.spacing.max(0.0);
    let direction = if opts.clockwise { 1.0 } else { -1.0 };

    let mut positions = vec![Point::default(); n];
    let mut r = 0.0_f64;
    for level in &levels {
        let d_theta = std::f64::consts::TAU / level.len() as f64;
        if level.len() > 1 {
            let dcos = d_theta.cos() - 1.0;
            let dsin = d_theta.sin();
            let r_min = (min_dist * min_dist / (dcos * dcos + dsin * dsin)).sqrt();
            r = r.max(r_min);
        }
        for (j, &idx) in level.iter().enumerate() {
            let theta = opts.start_angle + direction * d_theta * j as f64;
            positions[idx] = Point::new(r * theta.cos(), r * theta.sin());
        }
        r += min_dist;
    }

    Ok(LayoutResult { positions })
}
