use crate::config::SankeyConfig;
use crate::path::EdgePath;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Left edge of the node (breadth).
    pub column: f64,
    pub column_width: f64,
    /// Top edge of the node.
    pub depth: f64,
    pub height: f64,
    pub value: f64,
    /// Ordered by target depth once edges are stacked.
    pub outgoing_edges: Vec<EdgeId>,
    /// Ordered by source depth once edges are stacked.
    pub incoming_edges: Vec<EdgeId>,
    pub vertical_entry: bool,
    #[serde(skip)]
    pub column_hint: Option<f64>,
    #[serde(skip)]
    pub depth_hint: Option<f64>,
}

impl Node {
    pub fn center(&self) -> f64 {
        self.depth + self.height / 2.0
    }

    pub fn right(&self) -> f64 {
        self.column + self.column_width
    }

    pub fn bottom(&self) -> f64 {
        self.depth + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub value: f64,
    pub thickness: f64,
    /// Offset of this band from the top of the source node.
    pub source_offset: f64,
    /// Offset of this band from the top of the target node.
    pub target_offset: f64,
}

/// The result of one layout run. Owns every node and edge; edges refer to nodes by [`NodeId`]
/// and nodes to edges by [`EdgeId`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub config: SankeyConfig,
    /// Vertical scale shared by node heights and edge thicknesses.
    pub ky: f64,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Layout {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId)
    }

    /// Looks a node up by its caller-supplied id.
    pub fn find_node(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    /// Restacks edges after node depths were changed from outside (e.g. a manual drag).
    ///
    /// Only edge order and offsets change; node depths and heights are left as they are.
    pub fn relayout(&mut self) {
        crate::algo::stack::compute_edge_offsets(&mut self.nodes, &mut self.edges);
    }

    /// Runs one collision-resolution pass over every column with the current depths.
    pub fn resolve_collisions(&mut self) {
        let mut columns = crate::algo::depth::group_by_column(&self.nodes);
        crate::algo::depth::resolve_collisions(&mut self.nodes, &mut columns, &self.config);
    }

    pub fn edge_path(&self, id: EdgeId) -> EdgePath {
        crate::path::edge_path(self, id, self.config.curvature)
    }

    pub fn edge_paths(&self) -> impl Iterator<Item = (EdgeId, EdgePath)> + '_ {
        self.edge_ids().map(|id| (id, self.edge_path(id)))
    }
}
