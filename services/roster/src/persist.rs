//! JSON snapshot persistence for the occupancy grid.
//!
//! The in-memory store is the source of truth while the process lives; the
//! snapshot file exists so a restart resumes from the last known grid. Load
//! tolerates a missing file (fresh install) but surfaces every other
//! failure, including records whose coordinates fall outside the grid.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use roster_grid::{Assignment, Slot};
use thiserror::Error;

/// Errors from snapshot load, save, and backup.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem failure reading or writing the snapshot.
    #[error("snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot file exists but does not parse as assignment records.
    #[error("snapshot parse error at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Save seam between the allocation core and persistence.
///
/// Called after every successful mutation, outside the core's critical
/// section. A failed save is reported to the caller and nothing else; the
/// in-memory grid is never rolled back.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, assignments: &BTreeMap<Slot, Assignment>) -> Result<(), PersistError>;
}

/// Snapshot file of flat `{user, team, lane}` records.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Creates a handle for the given snapshot path. Nothing is touched on
    /// disk until [`JsonFile::load`] or a save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `.bak` sibling written by [`JsonFile::backup`].
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut os = self.path.clone().into_os_string();
        os.push(".bak");
        PathBuf::from(os)
    }

    /// Loads the persisted assignments.
    ///
    /// A missing file means an empty grid. Any other read or parse failure
    /// is surfaced so startup can refuse to run from a corrupt snapshot.
    pub fn load(&self) -> Result<Vec<Assignment>, PersistError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&data).map_err(|e| PersistError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Copies the live snapshot to its `.bak` sibling and returns the
    /// backup path.
    pub fn backup(&self) -> Result<PathBuf, PersistError> {
        let backup_path = self.backup_path();
        fs::copy(&self.path, &backup_path).map_err(|e| PersistError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(backup_path)
    }
}

impl SnapshotStore for JsonFile {
    fn save(&self, assignments: &BTreeMap<Slot, Assignment>) -> Result<(), PersistError> {
        let records: Vec<&Assignment> = assignments.values().collect();
        let data = serde_json::to_string(&records).map_err(|e| PersistError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, data).map_err(|e| PersistError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}
