//! Flat-file storage engine and configuration surface.
//!
//! # Responsibility
//! - Load the whole backing file into memory at construction time.
//! - Overwrite the backing file in full after every successful mutation.
//! - Absorb transient file-lock contention with a bounded retry loop.
//!
//! # Invariants
//! - A missing backing file is created as an empty collection, never an error.
//! - Unparseable file content fails loading outright; it is never swallowed.
//! - Retry applies only to transient lock conflicts; every other I/O failure
//!   propagates immediately.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

use serde::Deserialize;

mod file;

pub use file::{load_collection, persist_collection};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for loading and persisting the backing file.
#[derive(Debug)]
pub enum StoreError {
    /// Non-retryable I/O failure while reading or writing the backing file.
    Io { path: PathBuf, source: io::Error },
    /// The backing file exists but does not hold a serialized collection.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The in-memory collection could not be encoded for persistence.
    Encode { source: serde_json::Error },
    /// The backing file stayed locked by another process for every attempt.
    ///
    /// By the time this surfaces the in-memory mutation has already been
    /// applied; memory and disk have diverged.
    Busy {
        path: PathBuf,
        attempts: u32,
        source: io::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "backing file I/O failed at `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => write!(
                f,
                "backing file at `{}` does not contain a record collection: {source}",
                path.display()
            ),
            Self::Encode { source } => {
                write!(f, "failed to encode record collection: {source}")
            }
            Self::Busy {
                path,
                attempts,
                source,
            } => write!(
                f,
                "backing file at `{}` still locked after {attempts} attempts: {source}",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Busy { source, .. } => Some(source),
            Self::Corrupt { source, .. } | Self::Encode { source } => Some(source),
        }
    }
}

/// Data-layer configuration consumed by the core.
///
/// The surrounding application owns config loading; this struct only gives
/// the deserialized shape a home. The retry bound and backoff are fixed
/// constants, not tunables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataOptions {
    /// Location of the contacts backing file.
    pub contacts_path: PathBuf,
}
