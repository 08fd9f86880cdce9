//! Backing-file load and persist primitives.
//!
//! # Responsibility
//! - Read the full backing file into a typed collection exactly once per
//!   repository construction.
//! - Write the full collection back out, retrying on transient lock
//!   conflicts with a fixed bound and backoff.
//!
//! # Invariants
//! - Transient conflicts are detected by I/O error kind and OS error code,
//!   never by inspecting error message text.
//! - The loader tolerates `{}` and fully empty files as empty collections;
//!   new placeholder files are written as `[]` to match the real shape.

use std::future::Future;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{error, info, warn};

use super::{StoreError, StoreResult};
use crate::model::Record;

/// Total write attempts per persist call, first try included.
const WRITE_ATTEMPTS: u32 = 5;

/// Pause between consecutive write attempts.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Written when the backing file does not exist yet.
const EMPTY_PLACEHOLDER: &[u8] = b"[]";

/// Loads the whole backing file into an in-memory collection.
///
/// Creates the file with an empty-collection placeholder when it is absent.
///
/// # Errors
/// - [`StoreError::Corrupt`] when the file content is not a serialized
///   record collection.
/// - [`StoreError::Io`] for any other read or placeholder-write failure.
pub async fn load_collection<T: Record>(path: &Path) -> StoreResult<Vec<T>> {
    let started_at = Instant::now();

    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let records = parse_collection(path, &bytes)?;
            info!(
                "event=store_load module=store status=ok path={} records={} duration_ms={}",
                path.display(),
                records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(records)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tokio::fs::write(path, EMPTY_PLACEHOLDER)
                .await
                .map_err(|source| StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!(
                "event=store_load module=store status=ok path={} records=0 created=true duration_ms={}",
                path.display(),
                started_at.elapsed().as_millis()
            );
            Ok(Vec::new())
        }
        Err(source) => {
            error!(
                "event=store_load module=store status=error path={} error_code=read_failed error={}",
                path.display(),
                source
            );
            Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Serializes the full collection and overwrites the backing file.
///
/// # Errors
/// - [`StoreError::Busy`] when the file stayed locked for all
///   [`WRITE_ATTEMPTS`] attempts; the last conflict is carried as source.
/// - [`StoreError::Io`] for any non-transient write failure, immediately.
pub async fn persist_collection<T: Record>(path: &Path, records: &[T]) -> StoreResult<()> {
    let started_at = Instant::now();
    let bytes = serde_json::to_vec(records).map_err(|source| StoreError::Encode { source })?;

    write_with_retry(path, || {
        let path = path.to_path_buf();
        let bytes = bytes.clone();
        async move { tokio::fs::write(path, bytes).await }
    })
    .await?;

    info!(
        "event=store_persist module=store status=ok path={} records={} duration_ms={}",
        path.display(),
        records.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

fn parse_collection<T: Record>(path: &Path, bytes: &[u8]) -> StoreResult<Vec<T>> {
    let trimmed = bytes.trim_ascii();

    // Files written by the previous generation of this tool used `{}` as the
    // empty placeholder; treat it, like a fully empty file, as no records.
    if trimmed.is_empty() || trimmed == b"{}" {
        return Ok(Vec::new());
    }

    serde_json::from_slice(trimmed).map_err(|source| {
        error!(
            "event=store_load module=store status=error path={} error_code=corrupt_file error={}",
            path.display(),
            source
        );
        StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Runs `attempt` until it succeeds, a non-transient failure occurs, or the
/// attempt bound is exhausted, sleeping [`RETRY_BACKOFF`] between attempts.
async fn write_with_retry<F, Fut>(path: &Path, mut attempt: F) -> StoreResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match attempt().await {
            Ok(()) => return Ok(()),
            Err(source) if is_transient_lock(&source) => {
                if attempts >= WRITE_ATTEMPTS {
                    error!(
                        "event=store_persist module=store status=error path={} attempts={} error_code=file_busy error={}",
                        path.display(),
                        attempts,
                        source
                    );
                    return Err(StoreError::Busy {
                        path: path.to_path_buf(),
                        attempts,
                        source,
                    });
                }
                warn!(
                    "event=store_persist module=store status=retry path={} attempt={} backoff_ms={}",
                    path.display(),
                    attempts,
                    RETRY_BACKOFF.as_millis()
                );
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
            Err(source) => {
                error!(
                    "event=store_persist module=store status=error path={} error_code=write_failed error={}",
                    path.display(),
                    source
                );
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}

/// Returns whether an I/O failure means the file is momentarily held by
/// another process and the write is worth retrying.
fn is_transient_lock(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }
    matches!(err.raw_os_error(), Some(code) if TRANSIENT_OS_CODES.contains(&code))
}

// EBUSY, ETXTBSY
#[cfg(unix)]
const TRANSIENT_OS_CODES: &[i32] = &[16, 26];

// ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
#[cfg(windows)]
const TRANSIENT_OS_CODES: &[i32] = &[32, 33];
