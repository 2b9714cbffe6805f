//! The record store owns the student collection and is the only code path
//! that reads or writes it. It enforces id uniqueness, serves filtered
//! views, and writes the full collection through to the snapshot store after
//! every successful mutation, so the in-memory list and the persisted file
//! never drift apart.

pub mod seed;
pub mod snapshot;

use std::mem;

use thiserror::Error;

use crate::models::{Hostel, StudentRecord};

use self::snapshot::SnapshotStore;

/// Capacity of the hostel building. Dashboard occupancy figures derive from
/// this fixed count; room allocation itself stays free-form.
pub const TOTAL_ROOMS: usize = 300;

/// Failures a store operation can report to the UI.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An add collided with an existing id after normalization. The
    /// collection is left untouched.
    #[error("Student ID {0} already exists.")]
    DuplicateId(String),
    /// The targeted id is not in the collection.
    #[error("Student ID {0} not found.")]
    NotFound(String),
    /// The snapshot write failed. The triggering mutation is considered
    /// incomplete; there is no retry.
    #[error("Failed to save student records.")]
    Snapshot(#[source] anyhow::Error),
}

/// Predicate structure for [`RecordStore::list`]. Both fields are optional
/// and combine with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Restrict results to one hostel bucket.
    pub hostel: Option<Hostel>,
    /// Keep only records whose year label matches exactly.
    pub year: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &StudentRecord) -> bool {
        if let Some(hostel) = self.hostel {
            if record.hostel != hostel {
                return false;
            }
        }
        if let Some(year) = &self.year {
            if &record.year != year {
                return false;
            }
        }
        true
    }
}

/// Partial update applied by [`RecordStore::edit`]. The id is deliberately
/// absent: it is fixed at creation time.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub hostel: Option<Hostel>,
    pub room: Option<String>,
    pub year: Option<String>,
    pub contact: Option<String>,
    pub parent: Option<String>,
    pub address: Option<String>,
}

/// Result of a room reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomChangeOutcome {
    /// The requested room equals the current one. Nothing was written.
    NoChange,
    Changed { old_room: String, new_room: String },
}

/// Sole owner of the student collection.
pub struct RecordStore {
    records: Vec<StudentRecord>,
    snapshot: Box<dyn SnapshotStore>,
}

impl RecordStore {
    pub fn new(snapshot: Box<dyn SnapshotStore>) -> Self {
        Self {
            records: Vec::new(),
            snapshot,
        }
    }

    /// Load the persisted collection, or install the default seed and
    /// persist it immediately. A snapshot that is missing or fails to parse
    /// is treated as absent — the silent fallback is a deliberate policy,
    /// not an oversight, and first-run behavior depends on it.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        match self.snapshot.load() {
            Some(records) => {
                self.records = records;
                Ok(())
            }
            None => {
                self.records = seed::default_students();
                self.persist()
            }
        }
    }

    /// All records matching the filter, in insertion order.
    pub fn list(&self, filter: &RecordFilter) -> Vec<&StudentRecord> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    /// Exact, case-sensitive lookup. Callers normalize user input before
    /// calling; stored ids are already upper-case.
    pub fn find_by_id(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Normalize and append a new record, then persist. Rejects the insert
    /// without side effects when the normalized id is already taken.
    pub fn add(&mut self, record: StudentRecord) -> Result<(), StoreError> {
        let record = record.normalized();
        if self.records.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.records.push(record);
        self.persist()
    }

    /// Apply a partial update to the record with the given id, then persist.
    /// Attributes absent from the patch keep their current values.
    pub fn edit(&mut self, id: &str, patch: RecordPatch) -> Result<(), StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(hostel) = patch.hostel {
            record.hostel = hostel;
        }
        if let Some(room) = patch.room {
            record.room = room;
        }
        if let Some(year) = patch.year {
            record.year = year;
        }
        if let Some(contact) = patch.contact {
            record.contact = contact;
        }
        if let Some(parent) = patch.parent {
            record.parent = parent;
        }
        if let Some(address) = patch.address {
            record.address = address;
        }
        self.persist()
    }

    /// Move a student to another room. The id is normalized before lookup
    /// because this flow takes raw user input rather than a stored id.
    /// Reassigning to the current room is a no-op that skips the snapshot
    /// write entirely.
    pub fn reassign_room(
        &mut self,
        id: &str,
        new_room: &str,
    ) -> Result<RoomChangeOutcome, StoreError> {
        let id = id.trim().to_uppercase();
        let new_room = new_room.trim();
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if record.room == new_room {
            return Ok(RoomChangeOutcome::NoChange);
        }

        let old_room = mem::replace(&mut record.room, new_room.to_string());
        self.persist()?;
        Ok(RoomChangeOutcome::Changed {
            old_room,
            new_room: new_room.to_string(),
        })
    }

    /// Remove the record with the given id, then persist. Removal is
    /// immediate and permanent; any confirmation happens in the UI.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.records.remove(index);
        self.persist()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn count_by_hostel(&self, hostel: Hostel) -> usize {
        self.records
            .iter()
            .filter(|record| record.hostel == hostel)
            .count()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.snapshot
            .save(&self.records)
            .map_err(StoreError::Snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::snapshot::testing::MemorySnapshot;
    use super::*;

    fn fresh_store() -> (RecordStore, Rc<Cell<usize>>) {
        let (snapshot, saves) = MemorySnapshot::empty();
        let mut store = RecordStore::new(Box::new(snapshot));
        store.initialize().expect("initialize");
        (store, saves)
    }

    fn test_record(id: &str) -> StudentRecord {
        StudentRecord {
            id: id.to_string(),
            name: "Test User".to_string(),
            year: "1st".to_string(),
            room: "900".to_string(),
            contact: "000".to_string(),
            hostel: Hostel::Boys,
            parent: "X".to_string(),
            address: "Y".to_string(),
        }
    }

    #[test]
    fn initialize_seeds_and_persists_when_snapshot_absent() {
        let (store, saves) = fresh_store();
        assert_eq!(store.count(), 4);
        assert_eq!(saves.get(), 1);
        assert!(store.find_by_id("S1001").is_some());
    }

    #[test]
    fn initialize_prefers_the_persisted_snapshot() {
        let (snapshot, saves) = MemorySnapshot::with_records(vec![test_record("S9999")]);
        let mut store = RecordStore::new(Box::new(snapshot));
        store.initialize().expect("initialize");

        assert_eq!(store.count(), 1);
        assert!(store.find_by_id("S9999").is_some());
        // Loading an existing snapshot must not trigger a write.
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn reseed_is_idempotent() {
        let (mut store, _saves) = fresh_store();
        let first: Vec<StudentRecord> = store.list(&RecordFilter::default()).into_iter().cloned().collect();

        store.initialize().expect("second initialize");
        let second: Vec<StudentRecord> = store.list(&RecordFilter::default()).into_iter().cloned().collect();

        assert_eq!(first, second);
        assert_eq!(second, seed::default_students());
    }

    #[test]
    fn add_normalizes_id_and_trims_fields() {
        let (mut store, _saves) = fresh_store();
        let mut record = test_record("  s9999 ");
        record.name = "  Test User  ".to_string();
        store.add(record).expect("add");

        let stored = store.find_by_id("S9999").expect("stored record");
        assert_eq!(stored.name, "Test User");
    }

    #[test]
    fn duplicate_id_is_rejected_without_side_effects() {
        let (mut store, saves) = fresh_store();
        let before = store.count();
        let writes_before = saves.get();

        // Lower-case input collides with the seeded S1001 after
        // normalization.
        let result = store.add(test_record("s1001"));

        assert!(matches!(result, Err(StoreError::DuplicateId(id)) if id == "S1001"));
        assert_eq!(store.count(), before);
        assert_eq!(store.list(&RecordFilter::default()).len(), before);
        assert_eq!(saves.get(), writes_before);
    }

    #[test]
    fn successful_add_grows_the_collection_and_persists() {
        let (mut store, saves) = fresh_store();
        store.add(test_record("S9999")).expect("add");

        assert_eq!(store.count(), 5);
        assert_eq!(saves.get(), 2);

        // A second store reading the same snapshot sees all five records.
        let persisted: Vec<StudentRecord> =
            store.list(&RecordFilter::default()).into_iter().cloned().collect();
        let (snapshot, _) = MemorySnapshot::with_records(persisted);
        let mut reloaded = RecordStore::new(Box::new(snapshot));
        reloaded.initialize().expect("reload");
        assert_eq!(reloaded.count(), 5);
        assert!(reloaded.find_by_id("S9999").is_some());
    }

    #[test]
    fn ids_stay_pairwise_distinct_under_adds() {
        let (mut store, _saves) = fresh_store();
        for id in ["S9999", "s9999", " S9999 ", "S8888"] {
            let _ = store.add(test_record(id));
        }

        let all = store.list(&RecordFilter::default());
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn filter_applies_both_predicates_with_and_semantics() {
        let (store, _saves) = fresh_store();
        let all = store.list(&RecordFilter::default());
        assert_eq!(all.len(), 4);

        let boys = store.list(&RecordFilter {
            hostel: Some(Hostel::Boys),
            year: None,
        });
        assert!(boys.iter().all(|record| record.hostel == Hostel::Boys));
        assert_eq!(boys.len(), 2);

        let first_year_girls = store.list(&RecordFilter {
            hostel: Some(Hostel::Girls),
            year: Some("1st".to_string()),
        });
        assert_eq!(first_year_girls.len(), 1);
        assert_eq!(first_year_girls[0].id, "S1015");

        // Membership matches the predicate exactly, record by record.
        let filter = RecordFilter {
            hostel: Some(Hostel::Boys),
            year: Some("3rd".to_string()),
        };
        for record in store.list(&RecordFilter::default()) {
            let listed = store.list(&filter).iter().any(|r| r.id == record.id);
            assert_eq!(listed, filter.matches(record));
        }
    }

    #[test]
    fn list_preserves_insertion_order() {
        let (mut store, _saves) = fresh_store();
        store.add(test_record("S9999")).expect("add");
        let ids: Vec<&str> = store
            .list(&RecordFilter::default())
            .iter()
            .map(|record| record.id.as_str())
            .collect();
        assert_eq!(ids, ["S1001", "S2005", "S3010", "S1015", "S9999"]);
    }

    #[test]
    fn edit_keeps_id_and_unpatched_fields() {
        let (mut store, _saves) = fresh_store();
        let before = store.find_by_id("S2005").expect("seed record").clone();

        store
            .edit(
                "S2005",
                RecordPatch {
                    room: Some("206".to_string()),
                    contact: Some("9111111111".to_string()),
                    ..RecordPatch::default()
                },
            )
            .expect("edit");

        let after = store.find_by_id("S2005").expect("edited record");
        assert_eq!(after.id, before.id);
        assert_eq!(after.room, "206");
        assert_eq!(after.contact, "9111111111");
        assert_eq!(after.name, before.name);
        assert_eq!(after.year, before.year);
        assert_eq!(after.hostel, before.hostel);
        assert_eq!(after.parent, before.parent);
        assert_eq!(after.address, before.address);
    }

    #[test]
    fn edit_of_missing_id_reports_not_found() {
        let (mut store, saves) = fresh_store();
        let writes_before = saves.get();
        let result = store.edit("S0000", RecordPatch::default());
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "S0000"));
        assert_eq!(saves.get(), writes_before);
    }

    #[test]
    fn reassign_to_same_room_skips_the_snapshot_write() {
        let (mut store, saves) = fresh_store();
        let writes_before = saves.get();

        let outcome = store.reassign_room("S1001", "101A").expect("reassign");

        assert_eq!(outcome, RoomChangeOutcome::NoChange);
        assert_eq!(saves.get(), writes_before);
        assert_eq!(store.find_by_id("S1001").expect("record").room, "101A");
    }

    #[test]
    fn reassign_changes_the_room_and_persists() {
        let (mut store, saves) = fresh_store();
        let writes_before = saves.get();

        let outcome = store.reassign_room("s1001", "212").expect("reassign");

        assert_eq!(
            outcome,
            RoomChangeOutcome::Changed {
                old_room: "101A".to_string(),
                new_room: "212".to_string(),
            }
        );
        assert_eq!(saves.get(), writes_before + 1);
        assert_eq!(store.find_by_id("S1001").expect("record").room, "212");
    }

    #[test]
    fn reassign_of_missing_id_reports_not_found() {
        let (mut store, _saves) = fresh_store();
        let result = store.reassign_room("S9999", "999");
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "S9999"));
    }

    #[test]
    fn delete_then_find_is_absent_and_second_delete_fails() {
        let (mut store, _saves) = fresh_store();

        store.delete("S3010").expect("delete");
        assert!(store.find_by_id("S3010").is_none());
        assert_eq!(store.count(), 3);

        let again = store.delete("S3010");
        assert!(matches!(again, Err(StoreError::NotFound(id)) if id == "S3010"));
    }

    #[test]
    fn counts_track_the_live_collection() {
        let (mut store, _saves) = fresh_store();
        assert_eq!(store.count(), 4);
        assert_eq!(store.count_by_hostel(Hostel::Boys), 2);
        assert_eq!(store.count_by_hostel(Hostel::Girls), 2);

        store.add(test_record("S9999")).expect("add");
        assert_eq!(store.count(), 5);
        assert_eq!(store.count_by_hostel(Hostel::Boys), 3);

        store.delete("S2005").expect("delete");
        assert_eq!(store.count_by_hostel(Hostel::Girls), 1);
    }
}
