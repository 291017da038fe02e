//! Seeded force-directed layout.
//!
//! Fruchterman-Reingold style forces in the unit square, with initial
//! placement drawn from a seeded splitmix64 generator. The layout contract is
//! only: deterministic for a given seed+graph, stable across the whole run.

use std::collections::BTreeMap;

use crate::event::NodeId;

/// Fixed layout seed so repeated runs on the same input produce
/// byte-identical positions.
pub const LAYOUT_SEED: u64 = 42;

const ITERATIONS: usize = 60;
const INITIAL_TEMPERATURE: f64 = 0.1;

/// 节点坐标（单位正方形内）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}

// Deliberately not `rand`: layout positions feed byte-identical replay
// output, so the generator must be stable across platforms and runs.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn clamp01(v: f64) -> f64 {
    v.clamp(0.02, 0.98)
}

/// Compute positions for `nodes` (must be sorted and deduplicated); edges
/// with endpoints outside `nodes` are ignored.
pub fn spring_layout(
    nodes: &[NodeId],
    edges: &[(NodeId, NodeId)],
    seed: u64,
) -> BTreeMap<NodeId, Pos> {
    let n = nodes.len();
    let mut rng = SplitMix64::new(seed);
    let mut pos: Vec<Pos> = (0..n)
        .map(|_| Pos {
            x: rng.next_f64(),
            y: rng.next_f64(),
        })
        .collect();

    if n > 1 {
        let index_of = |id: NodeId| nodes.binary_search(&id).ok();
        let idx_edges: Vec<(usize, usize)> = edges
            .iter()
            .filter_map(|&(a, b)| Some((index_of(a)?, index_of(b)?)))
            .collect();

        let k = (1.0 / n as f64).sqrt().max(1e-3);
        let k2 = k * k;

        for iter in 0..ITERATIONS {
            let mut disp = vec![(0.0f64, 0.0f64); n];

            // Repulsion (O(n^2); protocol graphs are small)
            for i in 0..n {
                for j in (i + 1)..n {
                    let dx = pos[i].x - pos[j].x;
                    let dy = pos[i].y - pos[j].y;
                    let dist2 = (dx * dx + dy * dy).max(1e-6);
                    let dist = dist2.sqrt();
                    let f = k2 / dist;
                    let fx = (dx / dist) * f;
                    let fy = (dy / dist) * f;
                    disp[i].0 += fx;
                    disp[i].1 += fy;
                    disp[j].0 -= fx;
                    disp[j].1 -= fy;
                }
            }

            // Attraction along edges
            for &(a, b) in &idx_edges {
                if a == b {
                    continue;
                }
                let dx = pos[a].x - pos[b].x;
                let dy = pos[a].y - pos[b].y;
                let dist2 = (dx * dx + dy * dy).max(1e-6);
                let dist = dist2.sqrt();
                let f = (dist2 / k).min(5.0);
                let fx = (dx / dist) * f;
                let fy = (dy / dist) * f;
                disp[a].0 -= fx;
                disp[a].1 -= fy;
                disp[b].0 += fx;
                disp[b].1 += fy;
            }

            // Apply displacement with linear cooling
            let temperature =
                INITIAL_TEMPERATURE * (1.0 - iter as f64 / ITERATIONS as f64);
            for i in 0..n {
                let (dx, dy) = disp[i];
                let mag2 = dx * dx + dy * dy;
                if mag2 <= 1e-12 {
                    continue;
                }
                let mag = mag2.sqrt();
                let step = temperature.min(mag);
                pos[i].x = clamp01(pos[i].x + (dx / mag) * step);
                pos[i].y = clamp01(pos[i].y + (dy / mag) * step);
            }
        }
    }

    nodes.iter().copied().zip(pos).collect()
}
