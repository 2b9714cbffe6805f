//! Persistence collaborator for the record store. The contract is small on
//! purpose: save the full student collection as a JSON array under one
//! well-known location, and load it back or report "absent". Anything that
//! prevents a load from producing the expected shape (missing file, stale
//! format, hand-edited garbage) collapses into "absent" so startup can fall
//! back to the seed data without bothering the user.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::models::StudentRecord;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".hostel-desk";
/// Snapshot file name stored inside the application data directory.
const SNAPSHOT_FILE_NAME: &str = "students.json";

/// Storage abstraction the record store writes through. Production code uses
/// [`JsonSnapshotStore`]; tests substitute an in-memory double so they can
/// count writes and inject malformed data.
pub trait SnapshotStore {
    /// Overwrite the previous snapshot with the full collection. Must not
    /// drop fields; the serialized form is the canonical representation.
    fn save(&mut self, records: &[StudentRecord]) -> Result<()>;

    /// Return the previously saved collection, or `None` when nothing usable
    /// is stored. Parse failures are deliberately indistinguishable from a
    /// missing snapshot.
    fn load(&self) -> Option<Vec<StudentRecord>>;
}

/// Snapshot store backed by a pretty-printed JSON file in the user's data
/// directory.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Resolve the default snapshot path under the user's home directory and
    /// make sure the containing folder exists.
    pub fn open_default() -> Result<Self> {
        let path = data_dir()?.join(SNAPSHOT_FILE_NAME);
        Self::at_path(path)
    }

    /// Use an explicit snapshot path. Tests point this at a temp directory.
    pub fn at_path(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
        Ok(Self { path })
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn save(&mut self, records: &[StudentRecord]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(records).context("failed to serialize student records")?;
        fs::write(&self.path, json).context("failed to write student snapshot")
    }

    fn load(&self) -> Option<Vec<StudentRecord>> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }
}

/// Resolve the absolute path of the application data directory inside the
/// user's home. Receipts are written next to the snapshot file.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// In-memory snapshot double. Shares its write counter through an
    /// `Rc<Cell<_>>` so tests keep observing it after the store takes
    /// ownership of the boxed double.
    pub(crate) struct MemorySnapshot {
        stored: Option<Vec<StudentRecord>>,
        saves: Rc<Cell<usize>>,
    }

    impl MemorySnapshot {
        pub(crate) fn empty() -> (Self, Rc<Cell<usize>>) {
            let saves = Rc::new(Cell::new(0));
            (
                Self {
                    stored: None,
                    saves: Rc::clone(&saves),
                },
                saves,
            )
        }

        pub(crate) fn with_records(records: Vec<StudentRecord>) -> (Self, Rc<Cell<usize>>) {
            let (mut snapshot, saves) = Self::empty();
            snapshot.stored = Some(records);
            (snapshot, saves)
        }
    }

    impl SnapshotStore for MemorySnapshot {
        fn save(&mut self, records: &[StudentRecord]) -> Result<()> {
            self.stored = Some(records.to_vec());
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }

        fn load(&self) -> Option<Vec<StudentRecord>> {
            self.stored.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn store_in(dir: &tempfile::TempDir) -> JsonSnapshotStore {
        JsonSnapshotStore::at_path(dir.path().join("students.json")).expect("snapshot path")
    }

    #[test]
    fn load_is_absent_before_first_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert!(store.load().is_none());
    }

    #[test]
    fn save_then_load_round_trips_the_seed_set() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        let records = seed::default_students();

        store.save(&records).expect("save");
        let loaded = store.load().expect("snapshot present");

        assert_eq!(loaded, records);
    }

    #[test]
    fn save_overwrites_the_previous_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        let mut records = seed::default_students();

        store.save(&records).expect("first save");
        records.pop();
        store.save(&records).expect("second save");

        assert_eq!(store.load().expect("snapshot present").len(), records.len());
    }

    #[test]
    fn malformed_snapshot_loads_as_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("students.json");
        std::fs::write(&path, "{ not an array").expect("write garbage");

        let store = JsonSnapshotStore::at_path(path).expect("snapshot path");
        assert!(store.load().is_none());
    }

    #[test]
    fn wrong_shape_snapshot_loads_as_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("students.json");
        std::fs::write(&path, r#"[{"id": 42}]"#).expect("write wrong shape");

        let store = JsonSnapshotStore::at_path(path).expect("snapshot path");
        assert!(store.load().is_none());
    }
}
