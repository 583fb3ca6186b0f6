//! Errors raised while loading a network description

use std::path::PathBuf;

use thiserror::Error;

/// A failure that prevents the network from being loaded. Always fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The network description does not exist.
    #[error("network file not found at {path}")]
    NotFound { path: PathBuf },
    /// The network description could not be read.
    #[error("failed to read network file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The description is not well-formed GML.
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
    /// No top-level `graph [ ... ]` block was found.
    #[error("no top-level graph block in network description")]
    MissingGraph,
    /// A node block is missing required attributes or carries invalid values.
    #[error("invalid node on line {line}: {message}")]
    InvalidNode { line: usize, message: String },
    /// An edge block is missing required attributes or carries invalid values.
    #[error("invalid edge on line {line}: {message}")]
    InvalidEdge { line: usize, message: String },
    /// An edge references a node id that was never declared.
    #[error("edge on line {line} references unknown node {id}")]
    UnknownEndpoint { line: usize, id: i64 },
    /// Two nodes share the same source id.
    #[error("node id {id} on line {line} is duplicated")]
    DuplicateNode { line: usize, id: i64 },
}
