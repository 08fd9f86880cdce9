//! Contact use-case service.
//!
//! # Responsibility
//! - Provide stable address-book entry points for core callers.
//! - Delegate persistence to the repository contract.
//!
//! # Invariants
//! - Service APIs never bypass repository identity assignment: creation
//!   accepts payload fields only, so a caller can never smuggle in an id.
//! - The service layer remains storage-agnostic.

use serde::Deserialize;

use crate::model::contact::{Contact, ContactId};
use crate::repo::{JsonFlatFileRepository, RepoResult, Repository};
use crate::store::DataOptions;

/// Payload for creating a contact.
///
/// Carries no id field: identity is assigned by the repository on insert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Use-case facade over a contact repository.
pub struct AddressBookService<R: Repository<Contact>> {
    repo: R,
}

impl AddressBookService<JsonFlatFileRepository<Contact>> {
    /// Opens the service over the flat-file repository named in `options`.
    pub async fn open(options: &DataOptions) -> RepoResult<Self> {
        let repo = JsonFlatFileRepository::open(options.contacts_path.clone()).await?;
        Ok(Self::new(repo))
    }
}

impl<R: Repository<Contact>> AddressBookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a contact from payload fields and returns its assigned id.
    pub async fn create_contact(&self, request: NewContact) -> RepoResult<ContactId> {
        let contact = Contact::new(
            request.first_name,
            request.last_name,
            request.phone,
            request.email,
        );
        self.repo.insert(contact).await
    }

    /// Lists all contacts in insertion order.
    pub fn list_contacts(&self) -> Vec<Contact> {
        self.repo.get_all()
    }

    /// Gets one contact by id.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Contact> {
        self.repo.get_by_id(id)
    }

    /// Replaces the payload of an existing contact, matched by its id.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub async fn update_contact(&self, contact: &Contact) -> RepoResult<()> {
        self.repo.update(contact).await
    }

    /// Deletes a contact by id.
    pub async fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        self.repo.delete(id).await
    }

    /// Returns contacts matching a free-text query, in collection order.
    pub fn search_contacts(&self, query: &str) -> Vec<Contact> {
        self.repo.search(query)
    }
}
