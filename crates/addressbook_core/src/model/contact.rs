//! Contact domain model.
//!
//! # Responsibility
//! - Define the address-book record persisted in the flat file.
//! - Pin the on-disk JSON field names consumed by external tooling.
//!
//! # Invariants
//! - `id` is stable after insertion and never reused for another contact.
//! - Payload fields are plain text with no structural constraint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Record, RecordId};
use crate::search::matches_any;

/// Stable identifier for a stored contact.
pub type ContactId = RecordId;

/// Address-book entry with the wire field names `id`, `first_name`,
/// `last_name`, `phone`, `email`.
///
/// All payload fields participate in free-text search; none of them is
/// validated beyond being UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Assigned by the repository on insert. A value supplied by the caller
    /// is discarded at that point.
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    /// Creates a contact with a freshly generated id.
    ///
    /// The id is provisional: inserting the contact replaces it with the
    /// repository-assigned one.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), first_name, last_name, phone, email)
    }

    /// Creates a contact with a caller-provided id.
    ///
    /// Used by fixtures and import paths where identity already exists
    /// externally.
    pub fn with_id(
        id: ContactId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

impl Record for Contact {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    /// Case-insensitive substring match, OR across all four payload fields.
    fn matches(&self, query: &str) -> bool {
        matches_any(
            [
                self.first_name.as_str(),
                self.last_name.as_str(),
                self.phone.as_str(),
                self.email.as_str(),
            ],
            query,
        )
    }
}
