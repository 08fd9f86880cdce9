//! Data-access core for the address-book service.
//! This crate is the single source of truth for persistence invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactId};
pub use model::{Record, RecordId};
pub use repo::{JsonFlatFileRepository, RepoError, RepoResult, Repository};
pub use search::{contains_ignore_case, matches_any};
pub use service::contact_service::{AddressBookService, NewContact};
pub use store::{DataOptions, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
