use crate::model::{Edge, Node};

/// Sets each node's value to the larger of its outgoing and incoming flow totals.
pub fn compute_node_values(nodes: &mut [Node], edges: &[Edge]) {
    for n in nodes.iter_mut() {
        let out_sum: f64 = n.outgoing_edges.iter().map(|e| edges[e.0].value).sum();
        let in_sum: f64 = n.incoming_edges.iter().map(|e| edges[e.0].value).sum();
        n.value = out_sum.max(in_sum);
    }
}
