//! Endpoint resolution and adjacency.

use crate::config::SankeyConfig;
use crate::error::{Error, Result};
use crate::graph::{Endpoint, Graph};
use crate::model::{Edge, EdgeId, Node, NodeId};
use rustc_hash::FxHashMap;

/// Builds layout nodes and edges from `graph`, resolving every endpoint to a [`NodeId`] and
/// filling `outgoing_edges` / `incoming_edges` in edge input order.
pub fn link_graph(graph: &Graph, config: &SankeyConfig) -> Result<(Vec<Node>, Vec<Edge>)> {
    let mut nodes: Vec<Node> = graph
        .nodes
        .iter()
        .map(|n| Node {
            id: n.id.clone(),
            label: n.label.clone(),
            column: 0.0,
            column_width: config.node_width,
            depth: 0.0,
            height: 0.0,
            value: 0.0,
            outgoing_edges: Vec::new(),
            incoming_edges: Vec::new(),
            vertical_entry: n.vertical_entry,
            column_hint: n.column_hint,
            depth_hint: n.depth_hint,
        })
        .collect();

    let mut node_by_id: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, n) in graph.nodes.iter().enumerate() {
        if n.id.is_empty() {
            continue;
        }
        if node_by_id.insert(n.id.as_str(), i).is_some() {
            return Err(Error::DuplicateNodeId { id: n.id.clone() });
        }
    }

    let node_count = nodes.len();
    let resolve = |edge: usize, endpoint: &Endpoint| -> Result<NodeId> {
        match endpoint {
            Endpoint::Index(index) if *index < node_count => Ok(NodeId(*index)),
            Endpoint::Index(index) => Err(Error::EndpointOutOfRange {
                edge,
                index: *index,
                node_count,
            }),
            Endpoint::Id(id) => node_by_id
                .get(id.as_str())
                .copied()
                .map(NodeId)
                .ok_or_else(|| Error::UnknownNode {
                    edge,
                    id: id.clone(),
                }),
        }
    };

    let mut edges: Vec<Edge> = Vec::with_capacity(graph.edges.len());
    for (i, e) in graph.edges.iter().enumerate() {
        if !(e.value.is_finite() && e.value >= 0.0) {
            return Err(Error::InvalidValue {
                edge: i,
                value: e.value,
            });
        }
        let source = resolve(i, &e.source)?;
        let target = resolve(i, &e.target)?;
        edges.push(Edge {
            source,
            target,
            value: e.value,
            thickness: 0.0,
            source_offset: 0.0,
            target_offset: 0.0,
        });
    }

    for (i, e) in edges.iter().enumerate() {
        nodes[e.source.0].outgoing_edges.push(EdgeId(i));
        nodes[e.target.0].incoming_edges.push(EdgeId(i));
    }

    Ok((nodes, edges))
}
