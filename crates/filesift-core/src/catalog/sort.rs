/// Sort engine — total-order comparators over file records.
///
/// Every comparator falls through to `add_index` as a final tie-break, so
/// sort output is stable and repeatable across runs with identical input.
/// Descending order reverses the final total order rather than each key,
/// with one carve-out: records whose key is unset (missing date, unassigned
/// index) stay at the end regardless of direction.
use std::cmp::Ordering;

use crate::model::FileRecord;

/// The ten supported sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Insertion sequence number.
    AddIndex,
    /// Natural name compare, index as tie-break.
    NameIndex,
    /// Natural name compare, directory as tie-break.
    NamePath,
    /// Natural full-path compare, index as tie-break.
    PathIndex,
    /// Directory first, name as tie-break.
    PathName,
    Size,
    Extension,
    Signature,
    Created,
    Modified,
}

/// A sort key paired with a human label; immutable value object.
#[derive(Debug, Clone)]
pub struct SortOption {
    pub key: SortKey,
    pub label: &'static str,
}

impl SortOption {
    pub const fn new(key: SortKey, label: &'static str) -> Self {
        Self { key, label }
    }

    /// The built-in option set, in menu order.
    pub fn all() -> &'static [SortOption] {
        const OPTIONS: &[SortOption] = &[
            SortOption::new(SortKey::AddIndex, "Added order"),
            SortOption::new(SortKey::NameIndex, "Name, then added order"),
            SortOption::new(SortKey::NamePath, "Name, then folder"),
            SortOption::new(SortKey::PathIndex, "Path, then added order"),
            SortOption::new(SortKey::PathName, "Folder, then name"),
            SortOption::new(SortKey::Size, "Size"),
            SortOption::new(SortKey::Extension, "Extension"),
            SortOption::new(SortKey::Signature, "Signature"),
            SortOption::new(SortKey::Created, "Created date"),
            SortOption::new(SortKey::Modified, "Modified date"),
        ];
        OPTIONS
    }
}

/// Natural (human) string comparison: embedded digit runs compare by numeric
/// value, everything else case-insensitively character by character, so
/// "file2" sorts before "file10".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let ord = cmp_digit_runs(&mut ai, &mut bi);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let al = lower(ac);
                    let bl = lower(bc);
                    if al != bl {
                        return al.cmp(&bl);
                    }
                    ai.next();
                    bi.next();
                }
            }
        }
    }
}

#[inline]
fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Compare two digit runs numerically without parsing into an integer, so
/// arbitrarily long runs cannot overflow: after stripping leading zeros a
/// longer run is a bigger number, equal lengths compare lexicographically,
/// and fully equal values fall back to the raw run length ("007" > "7").
fn cmp_digit_runs(
    ai: &mut std::iter::Peekable<std::str::Chars<'_>>,
    bi: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Ordering {
    let ar = take_digits(ai);
    let br = take_digits(bi);
    let at = ar.trim_start_matches('0');
    let bt = br.trim_start_matches('0');
    at.len()
        .cmp(&bt.len())
        .then_with(|| at.cmp(bt))
        .then_with(|| ar.len().cmp(&br.len()))
}

fn take_digits(iter: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(&c) = iter.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        iter.next();
    }
    run
}

/// `add_index` compare with unassigned indexes sorting last.
fn cmp_add_index(a: &FileRecord, b: &FileRecord) -> Ordering {
    match (a.add_index, b.add_index) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Chronological compare with unset dates sorting last.
fn cmp_date(
    a: Option<chrono::DateTime<chrono::Local>>,
    b: Option<chrono::DateTime<chrono::Local>>,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Full ascending comparator for one key, including the final `add_index`
/// tie-break that makes the order total and deterministic.
fn compare(a: &FileRecord, b: &FileRecord, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::AddIndex => cmp_add_index(a, b),
        SortKey::NameIndex => {
            natural_cmp(a.base_name(), b.base_name()).then_with(|| cmp_add_index(a, b))
        }
        SortKey::NamePath => natural_cmp(a.base_name(), b.base_name())
            .then_with(|| natural_cmp(a.directory(), b.directory())),
        SortKey::PathIndex => natural_cmp(a.path(), b.path()).then_with(|| cmp_add_index(a, b)),
        SortKey::PathName => natural_cmp(a.directory(), b.directory())
            .then_with(|| natural_cmp(a.base_name(), b.base_name())),
        SortKey::Size => a.size_bytes.cmp(&b.size_bytes),
        SortKey::Extension => natural_cmp(a.extension(), b.extension()),
        SortKey::Signature => natural_cmp(a.signature.token(), b.signature.token()),
        SortKey::Created => cmp_date(a.created, b.created),
        SortKey::Modified => cmp_date(a.modified, b.modified),
    };
    primary.then_with(|| cmp_add_index(a, b))
}

/// Whether `key` has no value on this record (such records pin to the end of
/// the output in both directions).
fn key_is_unset(record: &FileRecord, key: SortKey) -> bool {
    match key {
        SortKey::AddIndex => record.add_index.is_none(),
        SortKey::Created => record.created.is_none(),
        SortKey::Modified => record.modified.is_none(),
        _ => false,
    }
}

/// Produce a new ordering of `records` under `key`; the input is untouched.
///
/// Descending reverses the ascending total order (so combined-key ties
/// resolve from the same comparator in both directions), then re-pins
/// unset-key records to the end.
pub fn sort_records(records: &[FileRecord], key: SortKey, ascending: bool) -> Vec<FileRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| compare(a, b, key));

    if !ascending {
        out.reverse();
        if out.iter().any(|r| key_is_unset(r, key)) {
            let (set, unset): (Vec<_>, Vec<_>) =
                out.into_iter().partition(|r| !key_is_unset(r, key));
            out = set;
            out.extend(unset);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileSignature;
    use chrono::TimeZone;

    fn rec(path: &str, index: u64) -> FileRecord {
        let mut r = FileRecord::new(path);
        r.add_index = Some(index);
        r
    }

    fn names(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.base_name()).collect()
    }

    #[test]
    fn natural_order_handles_digit_runs() {
        assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
        assert_eq!(natural_cmp("file10", "file2"), Ordering::Greater);
        assert_eq!(natural_cmp("file2", "file2"), Ordering::Equal);
    }

    #[test]
    fn natural_order_is_case_insensitive() {
        assert_eq!(natural_cmp("ABC", "abc"), Ordering::Equal);
        assert_eq!(natural_cmp("aBc2", "Abc10"), Ordering::Less);
    }

    #[test]
    fn natural_order_leading_zeros() {
        // Same numeric value: the longer (zero-padded) run sorts after.
        assert_eq!(natural_cmp("img007", "img7"), Ordering::Greater);
        assert_eq!(natural_cmp("img007", "img8"), Ordering::Less);
    }

    #[test]
    fn natural_order_very_long_digit_runs_do_not_overflow() {
        let a = format!("v{}", "9".repeat(40));
        let b = format!("v1{}", "0".repeat(40));
        assert_eq!(natural_cmp(&a, &b), Ordering::Less);
    }

    /// Property: sorting ["file10","file2","file1"] by name ascending yields
    /// ["file1","file2","file10"].
    #[test]
    fn name_sort_uses_natural_ordering() {
        let records = vec![
            rec("d/file10.png", 1),
            rec("d/file2.png", 2),
            rec("d/file1.png", 3),
        ];
        let sorted = sort_records(&records, SortKey::NameIndex, true);
        assert_eq!(names(&sorted), ["file1.png", "file2.png", "file10.png"]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let records = vec![rec("d/b.png", 1), rec("d/a.png", 2)];
        let _ = sort_records(&records, SortKey::NameIndex, true);
        assert_eq!(names(&records), ["b.png", "a.png"]);
    }

    /// Property: sort is idempotent.
    #[test]
    fn sort_is_idempotent() {
        let records = vec![
            rec("d/file3.gif", 3),
            rec("d/file1.gif", 1),
            rec("d/file2.gif", 2),
        ];
        let once = sort_records(&records, SortKey::NamePath, true);
        let twice = sort_records(&once, SortKey::NamePath, true);
        assert_eq!(names(&once), names(&twice));
    }

    /// Property: records with identical keys keep their add-index order.
    #[test]
    fn equal_keys_fall_back_to_add_index() {
        let mut a = rec("x/same.png", 7);
        let mut b = rec("y/same.png", 3);
        a.size_bytes = 100;
        b.size_bytes = 100;
        let sorted = sort_records(&[a, b], SortKey::Size, true);
        assert_eq!(sorted[0].add_index, Some(3));
        assert_eq!(sorted[1].add_index, Some(7));
    }

    #[test]
    fn descending_reverses_the_total_order() {
        let records = vec![rec("d/a1.png", 1), rec("d/a2.png", 2), rec("d/a3.png", 3)];
        let asc = sort_records(&records, SortKey::NameIndex, true);
        let mut desc = sort_records(&records, SortKey::NameIndex, false);
        desc.reverse();
        assert_eq!(names(&asc), names(&desc));
    }

    #[test]
    fn unset_dates_sort_last_in_both_directions() {
        let mut dated = rec("d/dated.png", 1);
        dated.modified = Some(chrono::Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        let undated = rec("d/undated.png", 2);

        let asc = sort_records(
            &[undated.clone(), dated.clone()],
            SortKey::Modified,
            true,
        );
        assert_eq!(names(&asc), ["dated.png", "undated.png"]);

        let desc = sort_records(&[undated, dated], SortKey::Modified, false);
        assert_eq!(names(&desc), ["dated.png", "undated.png"]);
    }

    #[test]
    fn unassigned_add_index_sorts_last() {
        let assigned = rec("d/in.png", 5);
        let unassigned = FileRecord::new("d/out.png");
        let sorted = sort_records(&[unassigned, assigned], SortKey::AddIndex, true);
        assert_eq!(names(&sorted), ["in.png", "out.png"]);
    }

    #[test]
    fn signature_sort_groups_by_token() {
        let mut a = rec("d/1.bin", 1);
        a.signature = FileSignature::Png;
        let mut b = rec("d/2.bin", 2);
        b.signature = FileSignature::Bmp;
        let sorted = sort_records(&[a, b], SortKey::Signature, true);
        assert_eq!(sorted[0].signature, FileSignature::Bmp);
    }

    #[test]
    fn path_name_sorts_by_directory_first() {
        let a = rec("beta/aaa.png", 1);
        let b = rec("alpha/zzz.png", 2);
        let sorted = sort_records(&[a, b], SortKey::PathName, true);
        assert_eq!(names(&sorted), ["zzz.png", "aaa.png"]);
    }

    #[test]
    fn option_set_covers_all_ten_keys() {
        assert_eq!(SortOption::all().len(), 10);
    }
}
