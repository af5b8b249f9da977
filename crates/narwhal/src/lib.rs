#![forbid(unsafe_code)]

//! Headless Sankey diagram layout.
//!
//! `narwhal` places the nodes of an acyclic flow graph into columns, sizes nodes and links in
//! proportion to their flow, relaxes vertical positions so connected nodes line up, and produces
//! path geometry for every link. It never draws anything: callers feed the resulting [`Layout`]
//! and [`EdgePath`]s to whatever renderer they use.
//!
//! ```
//! use narwhal::{Graph, NodeSpec, Sankey, SankeyConfig, Size};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node(NodeSpec::new("a"));
//! let b = graph.add_node(NodeSpec::new("b"));
//! graph.add_edge(a, b, 10.0);
//!
//! let sankey = Sankey::new(SankeyConfig {
//!     node_width: 20.0,
//!     node_padding: 5.0,
//!     size: Size::new(200.0, 100.0),
//!     ..Default::default()
//! });
//! let layout = sankey.layout(&graph).unwrap();
//! assert_eq!(layout.nodes[1].column, 180.0);
//! ```

pub mod algo;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod path;

pub use config::{SankeyConfig, Size};
pub use error::{Error, Result};
pub use graph::{EdgeSpec, Endpoint, Graph, NodeSpec};
pub use model::{Edge, EdgeId, Layout, Node, NodeId};
pub use path::{EdgePath, PathCommand, Point};

/// A configured layout engine. Holds no per-graph state, so one instance can lay out any number
/// of graphs, including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct Sankey {
    config: SankeyConfig,
}

impl Sankey {
    pub fn new(config: SankeyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SankeyConfig {
        &self.config
    }

    /// Runs the full pipeline: link, value, breadth, depth, stack.
    pub fn layout(&self, graph: &Graph) -> Result<Layout> {
        self.config.validate()?;
        let span = tracing::debug_span!(
            "sankey_layout",
            nodes = graph.nodes.len(),
            edges = graph.edges.len()
        );
        let _enter = span.enter();

        let (mut nodes, mut edges) = algo::link::link_graph(graph, &self.config)?;
        algo::value::compute_node_values(&mut nodes, &edges);
        let mode = algo::breadth::assign_breadths(&mut nodes, &edges, &self.config)?;
        let ky = algo::depth::compute_node_depths(&mut nodes, &mut edges, &self.config)?;
        algo::stack::compute_edge_offsets(&mut nodes, &mut edges);
        tracing::debug!(?mode, ky, "layout complete");

        Ok(Layout {
            config: self.config.clone(),
            ky,
            nodes,
            edges,
        })
    }
}

/// Headless layout entry point.
pub fn layout(graph: &Graph, config: &SankeyConfig) -> Result<Layout> {
    Sankey::new(config.clone()).layout(graph)
}
