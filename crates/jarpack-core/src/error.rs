//! Pipeline error type.

use crate::coordinate::CoordinateError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run. `CleanupFailed` is only ever reported by
/// the cleanup guard; it is never returned from the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file is missing. The CLI treats this as a clean early exit.
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// A line of the input file is not a `group:artifact:version` coordinate.
    #[error("malformed input at line {line_number} ({line:?})")]
    MalformedInput {
        line_number: usize,
        line: String,
        #[source]
        source: CoordinateError,
    },

    /// Fetching or writing the pom/jar of one coordinate failed.
    #[error("failed to fetch {line}")]
    FetchFailed {
        line: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to pack {}", path.display())]
    PackFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("{}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {}", path.display())]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the "nothing to do" exit that should not be reported as a failure.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, PipelineError::InputNotFound { .. })
    }
}
