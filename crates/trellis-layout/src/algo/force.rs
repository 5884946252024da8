use crate::algo::ForceOptions;
use crate::error::{Error, Result};
use crate::graph::{Graph, LayoutResult, Point};
use nalgebra::Vector2;

type Vec2 = Vector2<f64>;

const MIN_DISTANCE: f64 = 0.01;
// Pairwise repulsion is O(n^2) per iteration; past this many pair updates the iteration count
// is cut down and the cooling schedule stretched to still end cold.
const MAX_PAIR_UPDATES: usize = 60_000_000;
const MIN_ITERATIONS: usize = 30;

/// Fruchterman-Reingold style spring embedder with gravity towards the centroid.
pub fn layout(graph: &Graph, opts: &ForceOptions) -> Result<LayoutResult> {
    let adj = graph.adjacency()?;
    let n = adj.len();
    if n == 0 {
        return Ok(LayoutResult::default());
    }

    let k = opts.ideal_edge_length.max(1.0);
    let mut pos = seed_positions(n, k, opts.random_seed);

    let budget = (MAX_PAIR_UPDATES / (n * n))
        .max(MIN_ITERATIONS)
        .min(opts.max_iterations.max(1));
    let cooling = if budget < opts.max_iterations {
        (opts.convergence_threshold / opts.initial_temperature)
            .powf(1.0 / budget as f64)
            .clamp(0.0, 1.0)
    } else {
        opts.cooling
    };

    let mut temperature = opts.initial_temperature;
    let mut iterations = 0usize;
    let mut disp = vec![Vec2::zeros(); n];
    while iterations < budget {
        iterations += 1;
        disp.iter_mut().for_each(|d| *d = Vec2::zeros());

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = pos[i] - pos[j];
                let dist = delta.norm().max(MIN_DISTANCE);
                let push = delta * (k * k / (dist * dist));
                disp[i] += push;
                disp[j] -= push;
            }
        }

        for &(s, t) in &adj.edges {
            if s == t {
                continue;
            }
            let delta = pos[s] - pos[t];
            let dist = delta.norm().max(MIN_DISTANCE);
            let pull = delta * (dist / k);
            disp[s] -= pull;
            disp[t] += pull;
        }

        let centroid = pos.iter().fold(Vec2::zeros(), |acc, p| acc + p) / n as f64;
        let mut max_step = 0.0_f64;
        for (p, d) in pos.iter_mut().zip(disp.iter_mut()) {
            *d += (centroid - *p) * opts.gravity;
            let len = d.norm();
            if !len.is_finite() {
                return Err(Error::Diverged { iterations });
            }
            if len > 0.0 {
                let step = len.min(temperature);
                *p += *d * (step / len);
                max_step = max_step.max(step);
            }
        }

        temperature *= cooling;
        if max_step < opts.convergence_threshold {
            break;
        }
    }

    let positions: Vec<Point> = pos.iter().map(|p| Point::new(p.x, p.y)).collect();
    if positions.iter().any(|p| !p.is_finite()) {
        return Err(Error::Diverged { iterations });
    }
    Ok(LayoutResult { positions })
}

/// Circle start with a small seeded jitter so symmetric graphs still separate.
fn seed_positions(n: usize, k: f64, seed: u64) -> Vec<Vec2> {
    let radius = k * (n as f64).sqrt() / 2.0;
    let mut state = seed ^ 0x9e37_79b9_7f4a_7c15;
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            let jx = unit_noise(&mut state) * k * 0.1;
            let jy = unit_noise(&mut state) * k * 0.1;
            Vec2::new(radius * angle.cos() + jx, radius * angle.sin() + jy)
        })
        .collect()
}

/// splitmix64, mapped to [-0.5, 0.5).
fn unit_noise(state: &mut u64) -> f64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64 - 0.5
}
