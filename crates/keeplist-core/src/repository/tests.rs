//! Repository Integration Tests
//!
//! Store and session behaviour over in-memory and file slots, including
//! simulated reloads.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    use crate::clock::ManualClock;
    use crate::domain::{Flag, ListProfile, RawFields, RecordId};
    use crate::mutators::ClearScope;
    use crate::repository::{FileSlot, MemorySlot, RecordStore, Slot};
    use crate::session::ListSession;
    use crate::view::{Filter, SortKey, ViewQuery};

    const KEY: &str = "keeplist.todo.v1";

    fn setup_session(slot: &MemorySlot) -> ListSession<MemorySlot, ManualClock> {
        ListSession::open(ListProfile::todo(), slot.clone(), ManualClock::new(1_000))
    }

    fn reload(slot: &MemorySlot) -> ListSession<MemorySlot, ManualClock> {
        setup_session(slot)
    }

    #[test]
    fn test_load_absent_value_is_empty() {
        let store = RecordStore::new(MemorySlot::new(), KEY);
        assert!(store.load(0).is_empty());
    }

    #[test]
    fn test_load_corrupt_or_non_array_is_empty() {
        for raw in ["{not json", "{\"id\":\"a\"}", "42", "null", "\"text\""] {
            let store = RecordStore::new(MemorySlot::with_value(KEY, raw), KEY);
            assert!(store.load(0).is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn test_load_drops_non_objects_and_fixes_ids() {
        let raw = json!([
            {"id": "a", "text": "one"},
            "garbage",
            {"id": "a", "text": "duplicate id"},
            {"text": "no id"}
        ])
        .to_string();
        let store = RecordStore::new(MemorySlot::with_value(KEY, &raw), KEY);
        let records = store.load(5);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id.as_str(), "a");
        assert_ne!(records[1].id.as_str(), "a");
        assert!(!records[2].id.as_str().is_empty());
        let mut ids: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_save_load_is_fixed_point() {
        let stored = json!([
            {
                "id": "n1",
                "text": "Groceries",
                "body": "milk, eggs",
                "done": false,
                "pinned": true,
                "createdAt": 100,
                "updatedAt": 250,
                "color": "yellow"
            },
            {
                "id": "n2",
                "text": "Lunch",
                "amount": -12.5,
                "category": "Food",
                "date": "2024-02-01",
                "done": true,
                "pinned": false,
                "createdAt": 300,
                "updatedAt": 300
            }
        ]);
        let slot = MemorySlot::with_value(KEY, &stored.to_string());
        let store = RecordStore::new(slot.clone(), KEY);

        let loaded = store.load(9_999);
        store.save(&loaded).unwrap();

        let rewritten: Value = serde_json::from_str(&slot.raw(KEY).unwrap()).unwrap();
        assert_eq!(rewritten, stored);
    }

    #[test]
    fn test_create_then_reload() {
        let slot = MemorySlot::new();
        let mut session = setup_session(&slot);
        let created = session.create(&RawFields::text("Buy milk")).unwrap();

        let reloaded = reload(&slot);
        let found = reloaded.get(&created.id).unwrap();
        assert_eq!(found.text, "Buy milk");
        assert_eq!(found.created_at, found.updated_at);
    }

    #[test]
    fn test_validation_failure_changes_nothing() {
        let slot = MemorySlot::new();
        let mut session = setup_session(&slot);
        assert!(session.create(&RawFields::text("  ")).is_err());
        assert!(session.records().is_empty());
        assert_eq!(slot.raw(KEY), None);
    }

    #[test]
    fn test_remove_then_reload() {
        let slot = MemorySlot::new();
        let mut session = setup_session(&slot);
        let keep = session.create(&RawFields::text("keep")).unwrap();
        let gone = session.create(&RawFields::text("gone")).unwrap();

        session.remove(&gone.id).unwrap();
        let reloaded = reload(&slot);
        assert!(reloaded.get(&gone.id).is_none());
        assert!(reloaded.get(&keep.id).is_some());

        let before: Vec<_> = session.records().to_vec();
        assert!(session.remove(&RecordId::from("missing")).is_none());
        assert_eq!(session.records(), before.as_slice());
    }

    #[test]
    fn test_toggle_done_then_filter() {
        let slot = MemorySlot::new();
        let mut session = setup_session(&slot);
        let created = session.create(&RawFields::text("Buy milk")).unwrap();
        session.toggle_flag(&created.id, Flag::Done).unwrap();

        let active = ViewQuery {
            filter: Filter::Active,
            ..Default::default()
        };
        assert!(session.visible(&active).is_empty());

        let done = ViewQuery {
            filter: Filter::Done,
            ..Default::default()
        };
        let visible = session.visible(&done);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, created.id);

        let reloaded = reload(&slot);
        assert!(reloaded.get(&created.id).unwrap().done);
    }

    #[test]
    fn test_pinning_overrides_timestamp_order() {
        let slot = MemorySlot::new();
        let clock = ManualClock::new(100);
        let mut session = ListSession::open(ListProfile::notes(), slot.clone(), &clock);
        let older = session.create(&RawFields::text("older")).unwrap();
        clock.set(200);
        let newer = session.create(&RawFields::text("newer")).unwrap();

        let query = ViewQuery {
            sort: SortKey::parse("updated_desc"),
            ..Default::default()
        };
        let order: Vec<_> = session.visible(&query).iter().map(|r| r.id.clone()).collect();
        assert_eq!(order, [newer.id.clone(), older.id.clone()]);

        clock.set(150);
        session.toggle_flag(&older.id, Flag::Pinned).unwrap();
        let order: Vec<_> = session.visible(&query).iter().map(|r| r.id.clone()).collect();
        assert_eq!(order, [older.id, newer.id]);
    }

    #[test]
    fn test_update_with_form_input() {
        let slot = MemorySlot::new();
        let clock = ManualClock::new(10);
        let mut session = ListSession::open(ListProfile::notes(), slot.clone(), &clock);
        let note = session.create(&RawFields::default()).unwrap();
        assert_eq!(note.text, "Untitled");

        clock.advance(5);
        let raw = RawFields {
            text: "Plan".to_string(),
            body: "step one".to_string(),
            ..Default::default()
        };
        let updated = session.update(&note.id, &raw).unwrap().unwrap();
        assert_eq!(updated.text, "Plan");
        assert_eq!(updated.body.as_deref(), Some("step one"));
        assert_eq!(updated.updated_at, 15);
        assert_eq!(updated.created_at, 10);

        assert_eq!(session.update(&RecordId::from("gone"), &raw).unwrap(), None);
    }

    #[test]
    fn test_update_clears_blank_optional_fields() {
        let slot = MemorySlot::new();
        let mut session = ListSession::open(ListProfile::expenses(), slot.clone(), ManualClock::new(0));
        let rent = session
            .create(&RawFields {
                text: "Rent".to_string(),
                amount: "-5".to_string(),
                category: "Bills".to_string(),
                date: "2024-03-01".to_string(),
                ..Default::default()
            })
            .unwrap();

        let cleared = RawFields {
            text: "Rent".to_string(),
            amount: "-5".to_string(),
            ..Default::default()
        };
        let updated = session.update(&rent.id, &cleared).unwrap().unwrap();
        assert_eq!(updated.category, None);
        assert_eq!(updated.date, None);

        let reopened = ListSession::open(ListProfile::expenses(), slot.clone(), ManualClock::new(0));
        assert_eq!(reopened.records()[0].category, None);
        assert_eq!(reopened.records()[0].date, None);
    }

    #[test]
    fn test_blank_expense_date_defaults_to_today() {
        // 2024-03-15T00:00:00Z
        let clock = ManualClock::new(1_710_460_800_000);
        let mut session = ListSession::open(ListProfile::expenses(), MemorySlot::new(), &clock);
        assert_eq!(session.blank_fields().date, "2024-03-15");

        let raw = RawFields {
            text: "Lunch".to_string(),
            amount: "-12".to_string(),
            ..Default::default()
        };
        let lunch = session.create(&raw).unwrap();
        assert_eq!(lunch.date, NaiveDate::from_ymd_opt(2024, 3, 15));

        let amounts = session.summary(&ViewQuery::default()).amounts.unwrap();
        assert_eq!(amounts.this_month, -12.0);

        let todo = setup_session(&MemorySlot::new());
        assert_eq!(todo.blank_fields(), RawFields::default());
    }

    #[test]
    fn test_clear_done_persists() {
        let slot = MemorySlot::new();
        let mut session = setup_session(&slot);
        let a = session.create(&RawFields::text("a")).unwrap();
        session.create(&RawFields::text("b")).unwrap();
        session.toggle_flag(&a.id, Flag::Done).unwrap();

        assert_eq!(session.clear(ClearScope::Done), 1);
        assert_eq!(reload(&slot).records().len(), 1);
        assert_eq!(session.clear(ClearScope::Done), 0);
    }

    #[test]
    fn test_session_over_file_slot() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let slot = FileSlot::open(dir.path()).unwrap();
        let mut session = ListSession::open(ListProfile::expenses(), slot.clone(), ManualClock::new(0));
        let raw = RawFields {
            text: "Coffee".to_string(),
            amount: "-3.5".to_string(),
            category: "Food".to_string(),
            ..Default::default()
        };
        session.create(&raw).unwrap();

        let reopened = ListSession::open(ListProfile::expenses(), slot.clone(), ManualClock::new(0));
        assert_eq!(reopened.records().len(), 1);
        assert_eq!(reopened.records()[0].amount, Some(-3.5));
        assert!(slot.get("keeplist.expenses.v1").unwrap().is_some());
    }

    #[test]
    fn test_profiles_use_separate_slots() {
        let slot = MemorySlot::new();
        let mut todo = setup_session(&slot);
        todo.create(&RawFields::text("task")).unwrap();

        let notes = ListSession::open(ListProfile::notes(), slot.clone(), ManualClock::new(0));
        assert!(notes.records().is_empty());
    }
}
