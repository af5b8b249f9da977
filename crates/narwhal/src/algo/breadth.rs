//! Column (breadth) assignment.

use crate::algo::{all_hinted, node_name};
use crate::config::SankeyConfig;
use crate::error::{Error, Result};
use crate::model::{Edge, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreadthMode {
    /// Columns come from `NodeSpec::column_hint`.
    Hinted,
    /// Columns come from longest-path layering.
    Computed,
}

/// Assigns `column` for every node and scales columns to the canvas width.
pub fn assign_breadths(
    nodes: &mut [Node],
    edges: &[Edge],
    config: &SankeyConfig,
) -> Result<BreadthMode> {
    let usable_width = config.size.width - config.node_width;

    if all_hinted(nodes, "column", |n| n.column_hint)? {
        let max_hint = nodes
            .iter()
            .filter_map(|n| n.column_hint)
            .fold(f64::NEG_INFINITY, f64::max);
        let kx = if max_hint > 0.0 {
            usable_width / max_hint
        } else {
            0.0
        };
        for n in nodes.iter_mut() {
            n.column = n.column_hint.unwrap_or(0.0) * kx;
        }
        tracing::debug!(max_hint, kx, "assigned hinted breadths");
        return Ok(BreadthMode::Hinted);
    }

    let layer_count = compute_layers(nodes, edges)?;
    if config.align_sources_right {
        move_sources_right(nodes, edges);
    }
    move_sinks_right(nodes, layer_count);

    let kx = if layer_count > 1 {
        usable_width / (layer_count as f64 - 1.0)
    } else {
        0.0
    };
    for n in nodes.iter_mut() {
        n.column *= kx;
    }
    tracing::debug!(layer_count, kx, "assigned computed breadths");
    Ok(BreadthMode::Computed)
}

/// Frontier layering: every node starts in the frontier, and each sweep pushes the targets of
/// the current frontier one layer further. A node therefore ends on its longest path from a
/// source. Returns the number of layers.
fn compute_layers(nodes: &mut [Node], edges: &[Edge]) -> Result<usize> {
    let n = nodes.len();
    let mut current: Vec<usize> = (0..n).collect();
    let mut next: Vec<usize> = Vec::new();
    let mut next_seen = vec![false; n];
    let mut x: usize = 0;
    while !current.is_empty() {
        for &node_idx in &current {
            nodes[node_idx].column = x as f64;
            for e in &nodes[node_idx].outgoing_edges {
                let t = edges[e.0].target.0;
                if !next_seen[t] {
                    next_seen[t] = true;
                    next.push(t);
                }
            }
        }
        x += 1;
        if x > n {
            return Err(Error::Cycle {
                node: node_name(nodes, next.first().copied().unwrap_or(0)),
            });
        }
        current = std::mem::take(&mut next);
        next_seen.fill(false);
    }
    Ok(x)
}

fn move_sources_right(nodes: &mut [Node], edges: &[Edge]) {
    let layers: Vec<f64> = nodes.iter().map(|n| n.column).collect();
    for n in nodes.iter_mut() {
        if !n.incoming_edges.is_empty() {
            continue;
        }
        let nearest_target = n
            .outgoing_edges
            .iter()
            .map(|e| layers[edges[e.0].target.0])
            .fold(f64::INFINITY, f64::min);
        if nearest_target.is_finite() {
            n.column = nearest_target - 1.0;
        }
    }
}

fn move_sinks_right(nodes: &mut [Node], layer_count: usize) {
    for n in nodes.iter_mut() {
        if !n.outgoing_edges.is_empty() {
            continue;
        }
        if n.vertical_entry {
            n.column -= 0.5;
        } else {
            n.column = layer_count as f64 - 1.0;
        }
    }
}
