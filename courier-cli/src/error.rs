//! Error types emitted by the courier CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_core::PlanError;
use courier_data::{LoadError, PersistError};
use thiserror::Error;

/// Errors emitted by the courier CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A merged option holds an unusable value.
    #[error("invalid {field} (set --{field} or {env}): {reason}")]
    InvalidArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable carrying the option.
        env: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path that could not be inspected.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The output directory exists but is not a directory.
    #[error("output directory {path:?} is not a directory")]
    OutputDirectoryNotDirectory {
        /// Configured output path.
        path: Utf8PathBuf,
    },
    /// Creating the output directory failed.
    #[error("failed to create output directory {path:?}: {source}")]
    CreateOutputDirectory {
        /// Configured output path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Loading the graph or deliveries failed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The planner rejected the request.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Writing a JSON artefact failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// Writing the human-readable summary failed.
    #[error("failed to write plan summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
