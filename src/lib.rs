//! Core library functions for the structural graph cluster analyzer

pub mod config;
pub mod data;
pub mod graph;
pub mod scan;
pub mod storage;

pub use graph::CompressedGraph;
pub use scan::{Clustering, ScanIndex};

/// Errors surfaced by index construction, queries, and data loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested mode is deliberately not implemented.
    #[error("unsupported parameter: {0}")]
    UnsupportedParameter(String),

    /// A caller-supplied parameter is outside its accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A build-time invariant was violated; the index cannot be trusted.
    #[error("internal consistency violation: {0}")]
    InternalConsistency(String),

    /// An input file could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
