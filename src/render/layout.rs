//! Force-directed node placement.
//!
//! A Fruchterman-Reingold spring layout: nodes repel each other, edges pull
//! their endpoints together, and a falling temperature caps per-iteration
//! movement. Positions are normalized to roughly the unit square centered on
//! the origin; the renderer scales them for on-screen spacing.

use rand::rngs::StdRng;
use rand::RngExt;

const ITERATIONS: usize = 50;
const INITIAL_TEMPERATURE: f64 = 0.1;
const MIN_DISTANCE: f64 = 1e-9;

/// Compute 2-D positions for `node_count` nodes connected by `edges`
/// (index pairs). Initial placement comes from `rng`, so a seeded generator
/// gives a reproducible layout.
pub fn spring_layout(
    node_count: usize,
    edges: &[(usize, usize)],
    rng: &mut StdRng,
) -> Vec<(f64, f64)> {
    if node_count == 0 {
        return Vec::new();
    }
    if node_count == 1 {
        return vec![(0.0, 0.0)];
    }

    let mut pos: Vec<(f64, f64)> = (0..node_count)
        .map(|_| (rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5)))
        .collect();

    // Ideal pairwise distance for nodes spread over unit area.
    let k = (1.0 / node_count as f64).sqrt();
    let mut temperature = INITIAL_TEMPERATURE;
    let cooling = INITIAL_TEMPERATURE / ITERATIONS as f64;

    for _ in 0..ITERATIONS {
        let mut disp = vec![(0.0_f64, 0.0_f64); node_count];

        for i in 0..node_count {
            for j in (i + 1)..node_count {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let repulsion = k * k / dist;
                let (ux, uy) = (dx / dist, dy / dist);
                disp[i].0 += ux * repulsion;
                disp[i].1 += uy * repulsion;
                disp[j].0 -= ux * repulsion;
                disp[j].1 -= uy * repulsion;
            }
        }

        for &(a, b) in edges {
            if a == b || a >= node_count || b >= node_count {
                continue;
            }
            let dx = pos[a].0 - pos[b].0;
            let dy = pos[a].1 - pos[b].1;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let attraction = dist * dist / k;
            let (ux, uy) = (dx / dist, dy / dist);
            disp[a].0 -= ux * attraction;
            disp[a].1 -= uy * attraction;
            disp[b].0 += ux * attraction;
            disp[b].1 += uy * attraction;
        }

        for i in 0..node_count {
            let (dx, dy) = disp[i];
            let len = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let step = len.min(temperature);
            pos[i].0 += dx / len * step;
            pos[i].1 += dy / len * step;
        }

        temperature = (temperature - cooling).max(cooling);
    }

    normalize(&mut pos);
    pos
}

/// Center positions on the origin and scale the widest axis to [-0.5, 0.5].
fn normalize(pos: &mut [(f64, f64)]) {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.1).sum::<f64>() / n;
    for p in pos.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
    }

    let extent = pos
        .iter()
        .flat_map(|p| [p.0.abs(), p.1.abs()])
        .fold(0.0_f64, f64::max);
    if extent > MIN_DISTANCE {
        for p in pos.iter_mut() {
            p.0 /= extent * 2.0;
            p.1 /= extent * 2.0;
        }
    }
}
