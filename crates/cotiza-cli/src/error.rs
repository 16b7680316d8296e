/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `cotiza` binary. Every
/// variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - Exit code **2** — input failure: a file could not be read or parsed at
///   all (missing file, unreadable workbook, malformed session JSON, bad
///   precision argument). These terminate before any domain logic runs.
/// - Exit code **1** — logical failure: ingestion validation rejected a
///   price list, or no usable records survived. The offending supplier and
///   rows are named so the operator can fix the source file and retry.
use std::fmt;
use std::path::PathBuf;

use cotiza_core::PipelineError;
use cotiza_excel::{ExportError, ImportError};

/// All error conditions that the `cotiza` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read or write a file.
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// A generic I/O error not covered by the variants above.
    IoError {
        /// The path involved.
        path: PathBuf,
        /// The underlying I/O error message.
        detail: String,
    },

    /// A workbook could not be read as a price list.
    ImportFailed {
        /// The file that failed to import.
        path: PathBuf,
        /// The import error.
        source: ImportError,
    },

    /// A resolutions or quantities JSON file could not be parsed.
    InvalidJson {
        /// The file that failed to parse.
        path: PathBuf,
        /// The parse error message.
        detail: String,
    },

    /// The `--precision` argument is outside the supported 0–6 range.
    InvalidPrecision {
        /// The rejected value.
        got: u8,
    },

    // --- Exit code 1: logical failures ---
    /// The reconciliation pipeline rejected the input set.
    Pipeline(PipelineError),

    /// An export workbook could not be produced.
    ExportFailed(ExportError),

    /// The quote set could not be rendered as JSON.
    RenderFailed {
        /// The serialization error message.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::IoError { .. }
            | Self::ImportFailed { .. }
            | Self::InvalidJson { .. }
            | Self::InvalidPrecision { .. } => 2,
            Self::Pipeline(_) | Self::ExportFailed(_) | Self::RenderFailed { .. } => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => {
                write!(f, "file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                write!(f, "permission denied: {}", path.display())
            }
            Self::IoError { path, detail } => {
                write!(f, "I/O error on {}: {detail}", path.display())
            }
            Self::ImportFailed { path, source } => {
                write!(f, "could not import {}: {source}", path.display())
            }
            Self::InvalidJson { path, detail } => {
                write!(f, "invalid JSON in {}: {detail}", path.display())
            }
            Self::InvalidPrecision { got } => {
                write!(f, "precision must be between 0 and 6, got {got}")
            }
            Self::Pipeline(e) => write!(f, "{e}"),
            Self::ExportFailed(e) => write!(f, "{e}"),
            Self::RenderFailed { detail } => {
                write!(f, "could not render JSON output: {detail}")
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        Self::ExportFailed(e)
    }
}
