//! Vertical placement: scale, initial depths, relaxation and collision resolution.
//!
//! Nodes are grouped into columns by their (already scaled) breadth. The scale `ky` is picked so
//! the fullest column fits the canvas once padded, then depths are relaxed toward the weighted
//! centers of each node's neighbours for `iterations` rounds. Every half-round is followed by a
//! collision pass that restores minimum spacing inside each column. The influence weight `alpha`
//! cools by 1% per round.

use crate::algo::{all_hinted, f64_cmp};
use crate::config::SankeyConfig;
use crate::error::Result;
use crate::model::{Edge, EdgeId, Node, NodeId};

const COOLING: f64 = 0.99;

/// Groups node indices by exact column value. Columns are ordered left to right; nodes within a
/// column keep their input order.
pub fn group_by_column(nodes: &[Node]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| f64_cmp(nodes[a].column, nodes[b].column));

    let mut columns: Vec<Vec<usize>> = Vec::new();
    let mut current: Option<f64> = None;
    for i in order {
        let key = nodes[i].column;
        match columns.last_mut() {
            Some(column) if current == Some(key) => column.push(i),
            _ => {
                columns.push(vec![i]);
                current = Some(key);
            }
        }
    }
    columns
}

/// Sizes nodes and edges and assigns every node's `depth`. Returns the vertical scale `ky`.
///
/// With depth hints the hinted positions are final: no relaxation, collision pass or
/// vertical-entry pinning is applied.
pub fn compute_node_depths(
    nodes: &mut [Node],
    edges: &mut [Edge],
    config: &SankeyConfig,
) -> Result<f64> {
    let mut columns = group_by_column(nodes);
    let hinted = all_hinted(nodes, "depth", |n| n.depth_hint)?;
    let ky = initialize_node_depths(nodes, edges, &columns, config, hinted);
    tracing::debug!(columns = columns.len(), ky, hinted, "initialized node depths");
    warn_on_overflow(nodes, &columns, config);
    if hinted {
        return Ok(ky);
    }

    resolve_collisions(nodes, &mut columns, config);
    let mut alpha = 1.0;
    for iteration in 0..config.iterations {
        alpha *= COOLING;
        relax_right_to_left(nodes, edges, &columns, alpha);
        resolve_collisions(nodes, &mut columns, config);
        relax_left_to_right(nodes, edges, &columns, alpha);
        resolve_collisions(nodes, &mut columns, config);
        tracing::trace!(iteration, alpha, "relaxation round");
    }
    move_vertical_down(nodes, config);
    Ok(ky)
}

/// Smallest per-column scale that fits every column's padded stack into the canvas height.
pub fn vertical_scale(nodes: &[Node], columns: &[Vec<usize>], config: &SankeyConfig) -> f64 {
    let mut ky = f64::INFINITY;
    for column in columns {
        let sum: f64 = column.iter().map(|&i| nodes[i].value).sum();
        if !(sum > 0.0) {
            continue;
        }
        let available = config.size.height - (column.len() as f64 - 1.0) * config.node_padding;
        ky = ky.min(available / sum);
    }
    if ky.is_finite() && ky > 0.0 { ky } else { 0.0 }
}

fn initialize_node_depths(
    nodes: &mut [Node],
    edges: &mut [Edge],
    columns: &[Vec<usize>],
    config: &SankeyConfig,
    hinted: bool,
) -> f64 {
    let ky = vertical_scale(nodes, columns, config);
    let max_hint = nodes
        .iter()
        .filter_map(|n| n.depth_hint)
        .fold(1.0_f64, f64::max);

    for column in columns {
        for (i, &ni) in column.iter().enumerate() {
            let node = &mut nodes[ni];
            node.depth = match node.depth_hint {
                Some(hint) if hinted => hint / max_hint * config.size.height,
                _ => i as f64,
            };
            node.height = node.value * ky;
        }
    }
    for e in edges.iter_mut() {
        e.thickness = e.value * ky;
    }
    ky
}

fn warn_on_overflow(nodes: &[Node], columns: &[Vec<usize>], config: &SankeyConfig) {
    for column in columns {
        let required = column.iter().map(|&i| nodes[i].height).sum::<f64>()
            + (column.len() as f64 - 1.0) * config.node_padding;
        if required > config.size.height + 1e-9 {
            tracing::warn!(
                column = nodes[column[0]].column,
                required,
                available = config.size.height,
                "column does not fit the canvas; nodes will be packed flush"
            );
        }
    }
}

/// Value-weighted mean center of the far endpoints of `links`, or `None` if they carry no flow.
fn weighted_center(
    nodes: &[Node],
    edges: &[Edge],
    links: &[EdgeId],
    far_end: impl Fn(&Edge) -> NodeId,
) -> Option<f64> {
    let mut weighted = 0.0;
    let mut total = 0.0;
    for e in links {
        let edge = &edges[e.0];
        weighted += nodes[far_end(edge).0].center() * edge.value;
        total += edge.value;
    }
    (total > 0.0).then(|| weighted / total)
}

/// Visits columns from last to first and pulls each node toward its targets.
pub fn relax_right_to_left(
    nodes: &mut [Node],
    edges: &[Edge],
    columns: &[Vec<usize>],
    alpha: f64,
) {
    for column in columns.iter().rev() {
        for &ni in column {
            let Some(y) = weighted_center(nodes, edges, &nodes[ni].outgoing_edges, |e| e.target)
            else {
                continue;
            };
            let dy = (y - nodes[ni].center()) * alpha;
            nodes[ni].depth += dy;
        }
    }
}

/// Visits columns from first to last and pulls each node toward its sources.
pub fn relax_left_to_right(
    nodes: &mut [Node],
    edges: &[Edge],
    columns: &[Vec<usize>],
    alpha: f64,
) {
    for column in columns {
        for &ni in column {
            let Some(y) = weighted_center(nodes, edges, &nodes[ni].incoming_edges, |e| e.source)
            else {
                continue;
            };
            let dy = (y - nodes[ni].center()) * alpha;
            nodes[ni].depth += dy;
        }
    }
}

/// Enforces `node_padding` between neighbours of each column and keeps the column inside the
/// canvas when it fits. `columns` is re-sorted by depth in place.
pub fn resolve_collisions(nodes: &mut [Node], columns: &mut [Vec<usize>], config: &SankeyConfig) {
    let padding = config.node_padding;
    for column in columns.iter_mut() {
        if column.is_empty() {
            continue;
        }
        column.sort_by(|&a, &b| f64_cmp(nodes[a].depth, nodes[b].depth));

        // Push any overlapping nodes down.
        let mut y0 = 0.0;
        for &ni in column.iter() {
            let dy = y0 - nodes[ni].depth;
            if dy > 0.0 {
                nodes[ni].depth += dy;
            }
            y0 = nodes[ni].bottom() + padding;
        }

        // If the bottommost node goes outside the bounds, push it back up.
        let dy = y0 - padding - config.size.height;
        if dy > 0.0 {
            let last = column[column.len() - 1];
            nodes[last].depth -= dy;
            let mut y0 = nodes[last].depth;

            // Push any overlapping nodes back up.
            for &ni in column.iter().rev().skip(1) {
                let dy = nodes[ni].bottom() + padding - y0;
                if dy > 0.0 {
                    nodes[ni].depth -= dy;
                }
                y0 = nodes[ni].depth;
            }
        }
    }
}

fn move_vertical_down(nodes: &mut [Node], config: &SankeyConfig) {
    for n in nodes.iter_mut().filter(|n| n.vertical_entry) {
        n.depth = config.size.height - n.height;
    }
}
