use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowGraphError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dataset '{0}' not found in document")]
    MissingDataset(String),

    #[error("Record '{record}' has no amount for fiscal year {year}")]
    MissingAmount { record: String, year: String },

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("Edge {edge} references undeclared node {endpoint}")]
    DanglingEdge { edge: String, endpoint: String },

    #[error("Edge {edge} has negative weight {weight}")]
    NegativeWeight { edge: String, weight: f64 },

    #[error("Hub flow imbalance: inflow ({inflow}) != outflow ({outflow})")]
    HubImbalance { inflow: f64, outflow: f64 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlowGraphError>;
