use crate::algo::f64_cmp;
use crate::model::{Edge, Node};

/// Orders each node's edges by the depth of the far endpoint (ties keep edge input order) and
/// stacks their bands: every offset is the summed thickness of the edges before it.
pub fn compute_edge_offsets(nodes: &mut [Node], edges: &mut [Edge]) {
    let depths: Vec<f64> = nodes.iter().map(|n| n.depth).collect();
    for n in nodes.iter_mut() {
        n.outgoing_edges.sort_by(|a, b| {
            let ta = depths[edges[a.0].target.0];
            let tb = depths[edges[b.0].target.0];
            f64_cmp(ta, tb).then_with(|| a.cmp(b))
        });
        n.incoming_edges.sort_by(|a, b| {
            let sa = depths[edges[a.0].source.0];
            let sb = depths[edges[b.0].source.0];
            f64_cmp(sa, sb).then_with(|| a.cmp(b))
        });
    }

    for n in nodes.iter() {
        let mut sy = 0.0;
        for e in &n.outgoing_edges {
            edges[e.0].source_offset = sy;
            sy += edges[e.0].thickness;
        }
        let mut ty = 0.0;
        for e in &n.incoming_edges {
            edges[e.0].target_offset = ty;
            ty += edges[e.0].thickness;
        }
    }
}
