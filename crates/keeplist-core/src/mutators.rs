//! Mutators
//!
//! Plain functions over the in-memory sequence. They resolve records by
//! id and quietly do nothing when the id is gone. Persisting afterwards
//! is the caller's job (see [`crate::session::ListSession`]).

use crate::domain::{position_of, Flag, Record, RecordDraft, RecordId, RecordPatch};

/// Which records a bulk clear removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    All,
    Done,
}

impl ClearScope {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            ClearScope::All => true,
            ClearScope::Done => record.done,
        }
    }
}

/// Result of a quantity change on a cart line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
}

/// Prepend a new record built from `draft`
pub fn create(records: &mut Vec<Record>, draft: RecordDraft, now: i64) -> Record {
    let record = draft.into_record(RecordId::generate(now), now);
    records.insert(0, record.clone());
    record
}

/// Apply `patch` to the record with `id` and refresh its `updated_at`
pub fn update<'a>(
    records: &'a mut [Record],
    id: &RecordId,
    patch: RecordPatch,
    now: i64,
) -> Option<&'a Record> {
    let index = position_of(records, id)?;
    let record = &mut records[index];
    patch.apply(record);
    record.touch(now);
    Some(record)
}

/// Flip `flag` on the record with `id`; returns the new value
pub fn toggle_flag(records: &mut [Record], id: &RecordId, flag: Flag, now: i64) -> Option<bool> {
    let index = position_of(records, id)?;
    let record = &mut records[index];
    let value = !record.flag(flag);
    record.set_flag(flag, value);
    record.touch(now);
    Some(value)
}

/// Remove the record with `id`, returning it
pub fn remove(records: &mut Vec<Record>, id: &RecordId) -> Option<Record> {
    let index = position_of(records, id)?;
    Some(records.remove(index))
}

/// Prepend a copy of the record with `id`: fresh id and timestamps,
/// flags cleared, `suffix` appended to the text
pub fn duplicate(records: &mut Vec<Record>, id: &RecordId, suffix: &str, now: i64) -> Option<Record> {
    let source = &records[position_of(records, id)?];
    let mut copy = Record::new(RecordId::generate(now), format!("{}{}", source.text, suffix), now);
    copy.body = source.body.clone();
    copy.category = source.category.clone();
    copy.amount = source.amount;
    copy.quantity = source.quantity;
    copy.date = source.date;
    copy.extra = source.extra.clone();
    records.insert(0, copy.clone());
    Some(copy)
}

/// Remove every record matching `predicate`; returns how many went
pub fn clear<F>(records: &mut Vec<Record>, predicate: F) -> usize
where
    F: Fn(&Record) -> bool,
{
    let before = records.len();
    records.retain(|record| !predicate(record));
    before - records.len()
}

/// Change a line's quantity by `delta`. A line that would drop to zero
/// or below is removed.
pub fn adjust_quantity(
    records: &mut Vec<Record>,
    id: &RecordId,
    delta: i64,
    now: i64,
) -> Option<QuantityChange> {
    let index = position_of(records, id)?;
    let current = i64::from(records[index].quantity.unwrap_or(1));
    let next = current + delta;
    if next <= 0 {
        records.remove(index);
        return Some(QuantityChange::Removed);
    }
    let next = u32::try_from(next).unwrap_or(u32::MAX);
    let record = &mut records[index];
    record.quantity = Some(next);
    record.touch(now);
    Some(QuantityChange::Updated(next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Vec<Record> {
        let mut records = Vec::new();
        create(&mut records, RecordDraft::text("first"), 10);
        create(&mut records, RecordDraft::text("second"), 20);
        records
    }

    #[test]
    fn test_create_prepends_with_equal_timestamps() {
        let records = seeded();
        assert_eq!(records[0].text, "second");
        assert_eq!(records[1].text, "first");
        assert_eq!(records[0].created_at, 20);
        assert_eq!(records[0].updated_at, 20);
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn test_update_touches_and_ignores_unknown() {
        let mut records = seeded();
        let id = records[1].id.clone();
        let patch = RecordPatch {
            text: Some("renamed".to_string()),
            ..Default::default()
        };
        let updated = update(&mut records, &id, patch.clone(), 99).unwrap();
        assert_eq!(updated.text, "renamed");
        assert_eq!(updated.updated_at, 99);
        assert!(updated.updated_at >= updated.created_at);

        let before = records.clone();
        assert!(update(&mut records, &RecordId::from("missing"), patch, 100).is_none());
        assert_eq!(records, before);
    }

    #[test]
    fn test_toggle_twice_restores_flag_and_order() {
        let mut records = seeded();
        let order: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
        let id = records[0].id.clone();

        assert_eq!(toggle_flag(&mut records, &id, Flag::Done, 30), Some(true));
        assert_eq!(toggle_flag(&mut records, &id, Flag::Done, 31), Some(false));
        assert!(!records[0].done);
        assert_eq!(records[0].updated_at, 31);
        let after: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(order, after);
    }

    #[test]
    fn test_update_never_moves_updated_before_created() {
        let mut records = seeded();
        let id = records[0].id.clone();
        toggle_flag(&mut records, &id, Flag::Pinned, 5);
        assert_eq!(records[0].updated_at, records[0].created_at);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut records = seeded();
        let before = records.clone();
        assert!(remove(&mut records, &RecordId::from("nope")).is_none());
        assert_eq!(records, before);

        let id = records[0].id.clone();
        let removed = remove(&mut records, &id).unwrap();
        assert_eq!(removed.text, "second");
        assert!(records.iter().all(|r| r.id != id));
    }

    #[test]
    fn test_duplicate_resets_flags() {
        let mut records = seeded();
        let id = records[1].id.clone();
        toggle_flag(&mut records, &id, Flag::Pinned, 21);
        toggle_flag(&mut records, &id, Flag::Done, 22);
        records[1].amount = Some(4.5);

        let copy = duplicate(&mut records, &id, " (copy)", 50).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, copy.id);
        assert_eq!(copy.text, "first (copy)");
        assert_eq!(copy.amount, Some(4.5));
        assert!(!copy.pinned && !copy.done);
        assert_eq!((copy.created_at, copy.updated_at), (50, 50));

        assert!(duplicate(&mut records, &RecordId::from("nope"), "", 60).is_none());
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_clear_done_only() {
        let mut records = seeded();
        let id = records[0].id.clone();
        toggle_flag(&mut records, &id, Flag::Done, 30);

        assert_eq!(clear(&mut records, |r| ClearScope::Done.matches(r)), 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "first");
        assert_eq!(clear(&mut records, |r| ClearScope::All.matches(r)), 1);
        assert!(records.is_empty());
    }

    #[test]
    fn test_adjust_quantity_removes_at_zero() {
        let mut records = seeded();
        let id = records[0].id.clone();
        assert_eq!(adjust_quantity(&mut records, &id, 2, 40), Some(QuantityChange::Updated(3)));
        assert_eq!(adjust_quantity(&mut records, &id, -1, 41), Some(QuantityChange::Updated(2)));
        assert_eq!(adjust_quantity(&mut records, &id, -2, 42), Some(QuantityChange::Removed));
        assert_eq!(records.len(), 1);
        assert_eq!(adjust_quantity(&mut records, &id, 1, 43), None);
    }
}
