#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("graph contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },
    #[error("graph contains more than one node with id `{node_id}`")]
    DuplicateNode { node_id: String },
    #[error("unknown layout algorithm: {name}")]
    UnknownAlgorithm { name: String },
    #[error("layout produced non-finite positions after {iterations} iterations")]
    Diverged { iterations: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
