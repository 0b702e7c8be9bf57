/// Catalog — the ordered, deduplicated collection of file records.
///
/// Membership is O(1) via an auxiliary case-insensitive path set that is
/// kept in lockstep with the record list. The catalog is a single-writer
/// structure: callers serialize mutation; the ingestion pipeline hands back
/// finished batches rather than mutating the catalog from worker threads.
pub mod sort;

use std::collections::HashSet;
use thiserror::Error;

use crate::model::FileRecord;
use sort::{SortKey, SortOption};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("a record for {path} is already in the catalog")]
    DuplicatePath { path: String },
}

/// Insertion-ordered, path-deduplicated collection of [`FileRecord`]s.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<FileRecord>,
    /// Lowercased paths of every record, for O(1) duplicate checks.
    paths: HashSet<String>,
    /// The next `add_index` to assign; starts at 1 and re-densifies on
    /// [`Catalog::reorder_index`] and [`Catalog::clear`].
    next_index: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            paths: HashSet::new(),
            next_index: 1,
        }
    }

    /// Admit one record, assigning the next `add_index` and appending it.
    ///
    /// Rejected when a record with a case-insensitively equal path is
    /// already present.
    pub fn add(&mut self, mut record: FileRecord) -> Result<&FileRecord, CatalogError> {
        let key = record.path_key();
        if !self.paths.insert(key) {
            return Err(CatalogError::DuplicatePath {
                path: record.path().to_string(),
            });
        }
        record.add_index = Some(self.next_index);
        self.next_index += 1;
        let slot = self.records.len();
        self.records.push(record);
        Ok(&self.records[slot])
    }

    /// Batched admission; duplicates are skipped. Returns the count admitted.
    pub fn add_range(&mut self, records: impl IntoIterator<Item = FileRecord>) -> usize {
        records
            .into_iter()
            .filter(|r| self.add(r.clone()).is_ok())
            .count()
    }

    /// Remove the given records (matched by path). Absent records are a
    /// no-op contributing 0. Returns the count removed.
    pub fn remove(&mut self, records: &[FileRecord]) -> usize {
        let keys: HashSet<String> = records.iter().map(|r| r.path_key()).collect();
        let before = self.records.len();
        self.records.retain(|r| !keys.contains(&r.path_key()));
        for key in &keys {
            self.paths.remove(key);
        }
        before - self.records.len()
    }

    /// Empty the collection and reset the insertion counter to 1.
    pub fn clear(&mut self) {
        self.records.clear();
        self.paths.clear();
        self.next_index = 1;
    }

    /// Renumber `add_index` densely from 1 following the current display
    /// order — used after a manual reposition or to reset a sorted view.
    pub fn reorder_index(&mut self) {
        for (i, record) in self.records.iter_mut().enumerate() {
            record.add_index = Some(i as u64 + 1);
        }
        self.next_index = self.records.len() as u64 + 1;
    }

    /// Relocate the given records (matched by path) to `target_index`, or
    /// immediately after it when `place_after` is set, preserving their
    /// relative order. Out-of-range targets clamp to the collection bounds;
    /// absent records are ignored. Returns the count actually moved.
    ///
    /// The target index is interpreted against the order that remains after
    /// the moved records are pulled out, which is what drag-drop relocation
    /// expects: "drop after item X" stays anchored to X.
    pub fn move_records(
        &mut self,
        records: &[FileRecord],
        target_index: usize,
        place_after: bool,
    ) -> usize {
        let mut moved: Vec<FileRecord> = Vec::with_capacity(records.len());
        let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
        for record in records {
            let key = record.path_key();
            if !seen.insert(key.clone()) {
                continue;
            }
            if let Some(pos) = self.records.iter().position(|r| r.path_key() == key) {
                moved.push(self.records.remove(pos));
            }
        }
        if moved.is_empty() {
            return 0;
        }

        let mut pos = if place_after {
            target_index.saturating_add(1)
        } else {
            target_index
        };
        pos = pos.min(self.records.len());

        let count = moved.len();
        for (i, record) in moved.into_iter().enumerate() {
            self.records.insert(pos + i, record);
        }
        count
    }

    /// Re-sort the display order in place. No-op on an empty catalog;
    /// `add_index` values are preserved (use [`Catalog::reorder_index`] to
    /// re-densify them afterwards).
    pub fn sort(&mut self, option: &SortOption, ascending: bool) {
        if self.records.is_empty() {
            return;
        }
        self.records = sort::sort_records(&self.records, option.key, ascending);
    }

    /// Convenience wrapper taking a bare key.
    pub fn sort_by_key(&mut self, key: SortKey, ascending: bool) {
        self.sort(&SortOption::new(key, ""), ascending);
    }

    #[inline]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.paths.contains(&path.to_lowercase())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `size_bytes` across all records.
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(path: &str) -> FileRecord {
        FileRecord::new(path)
    }

    fn paths(catalog: &Catalog) -> Vec<&str> {
        catalog.records().iter().map(|r| r.base_name()).collect()
    }

    #[test]
    fn add_assigns_dense_increasing_indexes() {
        let mut cat = Catalog::new();
        cat.add(rec("d/a.png")).unwrap();
        cat.add(rec("d/b.png")).unwrap();
        cat.add(rec("d/c.png")).unwrap();
        let idx: Vec<u64> = cat.records().iter().map(|r| r.add_index.unwrap()).collect();
        assert_eq!(idx, [1, 2, 3]);
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let mut cat = Catalog::new();
        cat.add(rec("d/a.png")).unwrap();
        let err = cat.add(rec("d/a.png")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePath { .. }));
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn duplicate_check_is_case_insensitive() {
        let mut cat = Catalog::new();
        cat.add(rec("d/Photo.PNG")).unwrap();
        assert!(cat.add(rec("d/photo.png")).is_err());
        assert!(cat.contains_path("D/PHOTO.png"));
    }

    #[test]
    fn add_range_reports_admitted_count() {
        let mut cat = Catalog::new();
        cat.add(rec("d/a.png")).unwrap();
        let admitted = cat.add_range(vec![rec("d/a.png"), rec("d/b.png"), rec("d/c.png")]);
        assert_eq!(admitted, 2);
        assert_eq!(cat.len(), 3);
    }

    /// Invariant: path set cardinality always equals the record count.
    #[test]
    fn path_set_stays_in_lockstep_with_records() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("a/1.png"), rec("a/2.png"), rec("a/3.png")]);
        cat.remove(&[rec("a/2.png"), rec("a/nope.png")]);
        cat.add(rec("a/4.png")).unwrap();

        assert_eq!(cat.paths.len(), cat.records.len());
        let mut keys: Vec<String> = cat.records().iter().map(|r| r.path_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), cat.len(), "no two records share a path key");
    }

    #[test]
    fn remove_counts_only_present_records() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/a.png"), rec("d/b.png")]);
        let removed = cat.remove(&[rec("d/b.png"), rec("d/ghost.png")]);
        assert_eq!(removed, 1);
        assert_eq!(cat.len(), 1);
        assert!(!cat.contains_path("d/b.png"));
    }

    #[test]
    fn removed_path_can_be_added_again() {
        let mut cat = Catalog::new();
        cat.add(rec("d/a.png")).unwrap();
        cat.remove(&[rec("d/a.png")]);
        assert!(cat.add(rec("d/a.png")).is_ok());
    }

    #[test]
    fn clear_resets_the_index_counter() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/a.png"), rec("d/b.png")]);
        cat.clear();
        assert!(cat.is_empty());
        cat.add(rec("d/c.png")).unwrap();
        assert_eq!(cat.records()[0].add_index, Some(1));
    }

    #[test]
    fn reorder_index_follows_display_order() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/b2.png"), rec("d/b10.png"), rec("d/b1.png")]);
        cat.sort_by_key(SortKey::NameIndex, true);
        cat.reorder_index();

        let pairs: Vec<(&str, u64)> = cat
            .records()
            .iter()
            .map(|r| (r.base_name(), r.add_index.unwrap()))
            .collect();
        assert_eq!(pairs, [("b1.png", 1), ("b2.png", 2), ("b10.png", 3)]);
    }

    /// Property: moving {B,C} to just after A in [A,B,C,D] leaves the order
    /// unchanged when they were already adjacent after A.
    #[test]
    fn move_adjacent_block_after_anchor_is_identity() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/A"), rec("d/B"), rec("d/C"), rec("d/D")]);
        let moved = cat.move_records(&[rec("d/B"), rec("d/C")], 0, true);
        assert_eq!(moved, 2);
        assert_eq!(paths(&cat), ["A", "B", "C", "D"]);
    }

    /// Property: moving {D} before A on [A,B,C,D] yields [D,A,B,C].
    #[test]
    fn move_to_front() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/A"), rec("d/B"), rec("d/C"), rec("d/D")]);
        let moved = cat.move_records(&[rec("d/D")], 0, false);
        assert_eq!(moved, 1);
        assert_eq!(paths(&cat), ["D", "A", "B", "C"]);
    }

    #[test]
    fn move_preserves_relative_order_of_moved_block() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/A"), rec("d/B"), rec("d/C"), rec("d/D")]);
        cat.move_records(&[rec("d/B"), rec("d/D")], 2, true);
        assert_eq!(paths(&cat), ["A", "C", "B", "D"]);
    }

    #[test]
    fn move_clamps_out_of_range_target() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/A"), rec("d/B"), rec("d/C")]);
        cat.move_records(&[rec("d/A")], 99, true);
        assert_eq!(paths(&cat), ["B", "C", "A"]);
    }

    #[test]
    fn move_of_absent_records_is_a_no_op() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/A"), rec("d/B")]);
        let moved = cat.move_records(&[rec("d/ghost")], 0, false);
        assert_eq!(moved, 0);
        assert_eq!(paths(&cat), ["A", "B"]);
    }

    #[test]
    fn sort_on_empty_catalog_is_a_no_op() {
        let mut cat = Catalog::new();
        cat.sort_by_key(SortKey::Size, true);
        assert!(cat.is_empty());
    }

    #[test]
    fn sort_preserves_add_index_values() {
        let mut cat = Catalog::new();
        cat.add_range(vec![rec("d/z.png"), rec("d/a.png")]);
        cat.sort_by_key(SortKey::NameIndex, true);
        // Display order changed, indexes did not.
        assert_eq!(paths(&cat), ["a.png", "z.png"]);
        assert_eq!(cat.records()[0].add_index, Some(2));
        assert_eq!(cat.records()[1].add_index, Some(1));
    }

    #[test]
    fn total_size_sums_all_records() {
        let mut cat = Catalog::new();
        let mut a = rec("d/a.bin");
        a.size_bytes = 100;
        let mut b = rec("d/b.bin");
        b.size_bytes = 250;
        cat.add_range(vec![a, b]);
        assert_eq!(cat.total_size(), 350);
    }
}
