use serde::{Deserialize, Serialize};

/// Caller-supplied flow graph. Nothing here is validated until [`crate::Sankey::layout`] links it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default, alias = "links")]
    pub edges: Vec<EdgeSpec>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its index, usable as an [`Endpoint::Index`].
    pub fn add_node(&mut self, node: NodeSpec) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn add_edge(
        &mut self,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        value: f64,
    ) -> usize {
        self.edges.push(EdgeSpec {
            source: source.into(),
            target: target.into(),
            value,
        });
        self.edges.len() - 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Explicit column. Either every node carries one or none does.
    #[serde(
        default,
        alias = "posX",
        alias = "column",
        skip_serializing_if = "Option::is_none"
    )]
    pub column_hint: Option<f64>,
    /// Explicit vertical position. Either every node carries one or none does.
    #[serde(
        default,
        alias = "posY",
        alias = "depth",
        skip_serializing_if = "Option::is_none"
    )]
    pub depth_hint: Option<f64>,
    /// Incoming links enter from above or below and the node is pinned to the canvas bottom.
    #[serde(default, alias = "vertical")]
    pub vertical_entry: bool,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_column_hint(mut self, column: f64) -> Self {
        self.column_hint = Some(column);
        self
    }

    pub fn with_depth_hint(mut self, depth: f64) -> Self {
        self.depth_hint = Some(depth);
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical_entry = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: Endpoint,
    pub target: Endpoint,
    pub value: f64,
}

/// An edge endpoint before linking: a position in `Graph::nodes` or a node id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Index(usize),
    Id(String),
}

impl From<usize> for Endpoint {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        Self::Id(value.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(value: String) -> Self {
        Self::Id(value)
    }
}
