//! Error types raised while loading inputs or persisting outputs.

use camino::Utf8PathBuf;
use courier_core::NodeId;
use thiserror::Error;

/// Errors raised while reading the node, edge or delivery tables.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Opening an input file failed.
    #[error("failed to open {path}")]
    Open {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A header or row could not be read or decoded.
    #[error("failed to parse {path}")]
    Parse {
        /// Input file being parsed.
        path: Utf8PathBuf,
        /// Source error from `csv`; its message names the failing line.
        #[source]
        source: csv::Error,
    },
    /// A node row carried a non-finite coordinate.
    #[error("{path}:{line}: node {id} has a non-finite coordinate")]
    InvalidCoordinate {
        /// Nodes file.
        path: Utf8PathBuf,
        /// One-based CSV line.
        line: u64,
        /// Offending node id.
        id: NodeId,
    },
    /// An edge row carried a negative or non-finite weight.
    #[error("{path}:{line}: edge {u}-{v} has invalid weight {weight}")]
    InvalidWeight {
        /// Edges file.
        path: Utf8PathBuf,
        /// One-based CSV line.
        line: u64,
        /// First endpoint.
        u: NodeId,
        /// Second endpoint.
        v: NodeId,
        /// Rejected weight.
        weight: f64,
    },
    /// An edge row named a node missing from the nodes file.
    #[error("{path}:{line}: edge references unknown node {id}")]
    UnknownNode {
        /// Edges file.
        path: Utf8PathBuf,
        /// One-based CSV line.
        line: u64,
        /// Unregistered node id.
        id: NodeId,
    },
}

/// Errors raised while writing JSON artefacts.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Creating the output file or its parent directories failed.
    #[error("failed to create {path}")]
    Create {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Serialising or flushing the JSON document failed.
    #[error("failed to write JSON to {path}")]
    Serialise {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
