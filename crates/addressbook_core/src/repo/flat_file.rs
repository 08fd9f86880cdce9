//! Generic repository contract and JSON flat-file implementation.
//!
//! # Responsibility
//! - Own the in-memory record collection loaded once at construction.
//! - Serialize every mutation behind a capacity-1 gate, then rewrite the
//!   backing file in full.
//!
//! # Invariants
//! - Record ids are unique within the collection at all times; insert always
//!   assigns a fresh id and discards any caller-supplied one.
//! - Collection order is insertion order.
//! - A failed persist does not roll back the in-memory mutation; the
//!   instance is then ahead of the file until the next successful persist.
//! - Instances over the same path never refresh from disk after
//!   construction; reopening is the way to observe another instance's
//!   writes.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::model::{Record, RecordId};
use crate::store;

/// Storage-agnostic CRUD-and-search contract over a record collection.
///
/// Reads are synchronous snapshots of in-memory state; mutations are
/// asynchronous because they persist to the backing store before returning.
#[allow(async_fn_in_trait)]
pub trait Repository<T: Record> {
    /// Returns a snapshot of all records in insertion order.
    fn get_all(&self) -> Vec<T>;

    /// Returns the record with the given id.
    fn get_by_id(&self, id: RecordId) -> RepoResult<T>;

    /// Returns all records matching a free-text query, in collection order.
    fn search(&self, query: &str) -> Vec<T>;

    /// Appends a record under a freshly assigned id and persists.
    ///
    /// Any id already present on `record` is discarded. Returns the
    /// assigned id.
    async fn insert(&self, record: T) -> RepoResult<RecordId>;

    /// Replaces the payload of the record matching `record.id()` and
    /// persists. Identity is immutable; only payload fields change.
    async fn update(&self, record: &T) -> RepoResult<()>;

    /// Removes the record with the given id and persists.
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}

/// Repository backed by a single JSON file holding the whole collection.
///
/// The collection lives behind a read-write lock held only for in-memory
/// access, so reads racing a mutation observe the pre- or post-mutation
/// state but never a torn record. The `write_gate` mutex serializes the
/// mutate-then-persist sequence end to end.
#[derive(Debug)]
pub struct JsonFlatFileRepository<T: Record> {
    path: PathBuf,
    records: RwLock<Vec<T>>,
    write_gate: Mutex<()>,
}

impl<T: Record> JsonFlatFileRepository<T> {
    /// Opens a repository over `path`, creating the file when absent.
    ///
    /// The file is read exactly once here; the instance never refreshes
    /// from disk afterwards.
    ///
    /// # Errors
    /// - [`crate::store::StoreError::Corrupt`] (wrapped in
    ///   [`RepoError::Store`]) when the file content is not a serialized
    ///   record collection.
    pub async fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();
        let records = store::load_collection(&path).await?;
        Ok(Self {
            path,
            records: RwLock::new(records),
            write_gate: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists a snapshot of the current collection.
    ///
    /// The read lock is released before any I/O starts, so concurrent
    /// readers never wait on the file write.
    async fn persist_snapshot(&self) -> RepoResult<()> {
        let snapshot = self.records.read().clone();
        store::persist_collection(&self.path, &snapshot).await?;
        Ok(())
    }
}

impl<T: Record> Repository<T> for JsonFlatFileRepository<T> {
    fn get_all(&self) -> Vec<T> {
        self.records.read().clone()
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<T> {
        self.records
            .read()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }

    fn search(&self, query: &str) -> Vec<T> {
        self.records
            .read()
            .iter()
            .filter(|record| record.matches(query))
            .cloned()
            .collect()
    }

    async fn insert(&self, mut record: T) -> RepoResult<RecordId> {
        let started_at = Instant::now();
        let _gate = self.write_gate.lock().await;

        let id = Uuid::new_v4();
        record.assign_id(id);
        self.records.write().push(record);

        self.persist_snapshot().await?;
        info!(
            "event=record_insert module=repo status=ok id={id} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(id)
    }

    async fn update(&self, record: &T) -> RepoResult<()> {
        let started_at = Instant::now();
        let _gate = self.write_gate.lock().await;

        {
            let mut records = self.records.write();
            let Some(slot) = records.iter_mut().find(|slot| slot.id() == record.id()) else {
                return Err(RepoError::NotFound(record.id()));
            };
            *slot = record.clone();
        }

        self.persist_snapshot().await?;
        info!(
            "event=record_update module=repo status=ok id={} duration_ms={}",
            record.id(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let started_at = Instant::now();
        let _gate = self.write_gate.lock().await;

        {
            let mut records = self.records.write();
            let Some(index) = records.iter().position(|record| record.id() == id) else {
                return Err(RepoError::NotFound(id));
            };
            records.remove(index);
        }

        self.persist_snapshot().await?;
        info!(
            "event=record_delete module=repo status=ok id={id} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}
