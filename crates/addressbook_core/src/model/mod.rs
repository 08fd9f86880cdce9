//! Domain records stored in the flat-file collection.
//!
//! # Responsibility
//! - Define the generic record contract every stored type must satisfy.
//! - Keep concrete record shapes (contacts) in their own modules.
//!
//! # Invariants
//! - Every record carries a stable `RecordId` assigned by the repository.
//! - A record's identity never changes after insertion.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub mod contact;

/// Stable identifier assigned to every stored record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = Uuid;

/// Contract for any record type the flat-file repository can store.
///
/// Identity is owned by the repository: callers may pre-fill an id, but
/// insertion always overwrites it via [`Record::assign_id`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Returns this record's stable identifier.
    fn id(&self) -> RecordId;

    /// Overwrites this record's identifier.
    ///
    /// Called by the repository on insert; the previous value is discarded.
    fn assign_id(&mut self, id: RecordId);

    /// Returns whether this record satisfies a free-text search query.
    ///
    /// Each record type decides which of its fields participate in search.
    fn matches(&self, query: &str) -> bool;
}
