#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge {edge} references node index {index}, but the graph only has {node_count} nodes")]
    EndpointOutOfRange {
        edge: usize,
        index: usize,
        node_count: usize,
    },
    #[error("edge {edge} references unknown node id {id:?}")]
    UnknownNode { edge: usize, id: String },
    #[error("node id {id:?} is used by more than one node")]
    DuplicateNodeId { id: String },
    #[error("edge {edge} has an invalid flow value: {value}")]
    InvalidValue { edge: usize, value: f64 },
    #[error("{hint} hints must be set on every node or on none ({present} of {total} nodes have one)")]
    PartialHints {
        hint: &'static str,
        present: usize,
        total: usize,
    },
    #[error("graph contains a cycle through node {node:?}")]
    Cycle { node: String },
    #[error("invalid sankey config: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
