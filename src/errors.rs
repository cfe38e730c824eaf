//! Error types for sol_callgraph.
//!
//! Only structural problems surface here. Missing nodes, unresolvable callees
//! and dangling base contracts degrade to empty edge sets inside the engines.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The document is not a recognizable compiler AST.
    #[error("Malformed AST: {0}")]
    MalformedAst(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown algorithm '{0}' (expected 'cha' or 'rta')")]
    UnknownAlgorithm(String),

    #[error("Unknown output format '{0}' (expected 'json', 'dot' or 'text')")]
    UnknownFormat(String),
}

impl AnalysisError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        AnalysisError::MalformedAst(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AnalysisError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
