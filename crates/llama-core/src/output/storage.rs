//! File-backed save store.
//!
//! One JSON document per habitat. Loading never fails: a missing, unreadable
//! or malformed save is logged and replaced by the default habitat.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rand::Rng;

use crate::components::world::Habitat;
use crate::error::StorageError;
use crate::output::snapshot::{parse_snapshot, Snapshot};

pub fn save(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), llamas = snapshot.llamas.len(), "habitat saved");
    Ok(())
}

/// Reads and normalizes a save. `Ok(None)` when there is no save yet.
pub fn load<R: Rng + ?Sized>(
    path: impl AsRef<Path>,
    habitat: &Habitat,
    rng: &mut R,
) -> Result<Option<Snapshot>, StorageError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(parse_snapshot(&text, habitat, rng))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn load_or_default<R: Rng + ?Sized>(
    path: impl AsRef<Path>,
    habitat: &Habitat,
    rng: &mut R,
) -> Snapshot {
    let path = path.as_ref();
    match load(path, habitat, rng) {
        Ok(Some(snapshot)) => {
            tracing::info!(
                path = %path.display(),
                llamas = snapshot.llamas.len(),
                items = snapshot.items.len(),
                "habitat loaded"
            );
            snapshot
        }
        Ok(None) => {
            tracing::info!(path = %path.display(), "no saved habitat, starting fresh");
            Snapshot::default()
        }
        Err(err) => {
            tracing::warn!(%err, "could not read saved habitat, starting fresh");
            Snapshot::default()
        }
    }
}
