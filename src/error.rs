use std::{io, path::PathBuf};
use thiserror::Error;

/// Terminal failures of the data pipelines.
///
/// Carried inside [`anyhow::Error`] so callers can add context and still
/// recover the kind with `downcast_ref`.
#[derive(Debug, Error)]
pub enum Error {
    /// Input file is missing or unreadable.
    #[error("failed to read {path:?}")]
    DataAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input file does not have the expected row/column structure.
    #[error("malformed {path:?} at line {line}: {reason}")]
    Format {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Too few samples survived windowing.
    #[error("only {found} samples in [{start}, {end}], at least {required} required")]
    InsufficientData {
        found: usize,
        required: usize,
        start: f64,
        end: f64,
    },
}
