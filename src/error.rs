use crate::types::TypeToken;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpError {
    #[error("No terminal of type {0} in the terminal catalog")]
    NoMatchingTerminal(TypeToken),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Selection exhausted: total fitness weight is zero")]
    SelectionExhausted,

    #[error("Arity mismatch for {function}: arity {arity}, got {actual} argument(s)")]
    ArityMismatch {
        function: String,
        arity: usize,
        actual: usize,
    },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: TypeToken, actual: TypeToken },

    #[error("Population has {programs} programs but {scores} fitness scores")]
    PopulationMismatch { programs: usize, scores: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Environment error: {0}")]
    Environment(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GpError>;
