use std::path::PathBuf;
use thiserror::Error;

use crate::selection::NodeId;

/// Core library errors
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed tree: {0}")]
    Tree(#[from] TreeError),

    #[error("Task status error: {0}")]
    Poll(#[from] PollError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tree file '{path}': {source}")]
    TreeFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),

    #[error("Invalid selection operation '{0}' (expected check:ID, uncheck:ID, only:ID, all or none)")]
    InvalidOperation(String),

    #[error("{0}")]
    Other(String),
}

/// Structural errors raised while building a selection tree.
///
/// Any of these is fatal: no partial tree is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {id} refers to unknown parent {parent_id}")]
    UnresolvedParent { id: NodeId, parent_id: NodeId },

    #[error("node {0} has no parent")]
    MissingParent(NodeId),

    #[error("more than one node claims the root id 0")]
    DuplicateRoot,

    #[error("no root node (id 0) in the input")]
    MissingRoot,

    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),

    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),
}

/// Errors talking to the task status API
#[derive(Error, Debug)]
pub enum PollError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API answered with HTTP status {0}")]
    Status(u16),

    #[error("Got an unexpected status value: {0}")]
    UnexpectedStatus(String),

    #[error("Got an unexpected reply to the stop request: {0}")]
    UnexpectedStopReply(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BrowserError>;
