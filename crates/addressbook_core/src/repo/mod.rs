//! Repository layer abstractions and the flat-file implementation.
//!
//! # Responsibility
//! - Define the storage-agnostic record repository contract.
//! - Isolate flat-file persistence details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   storage transport errors.
//! - Mutations are serialized; reads never wait on persistence I/O.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::RecordId;
use crate::store::StoreError;

pub mod flat_file;

pub use flat_file::{JsonFlatFileRepository, Repository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record access and mutation operations.
#[derive(Debug)]
pub enum RepoError {
    /// No record carries the requested id.
    NotFound(RecordId),
    /// Storage-layer failure while loading or persisting.
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
