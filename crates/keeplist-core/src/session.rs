//! List Session
//!
//! Explicit application state for one profile: the record sequence, the
//! store it mirrors into, and the clock stamping mutations. Every
//! successful mutation re-persists the whole sequence.

use log::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::{
    Field, Flag, ListProfile, RawFields, Record, RecordDraft, RecordId, RecordPatch,
    ValidationError,
};
use crate::export::{self, Export, ExportError};
use crate::mutators::{self, ClearScope, QuantityChange};
use crate::repository::{RecordStore, Slot, StoreError};
use crate::view::{self, Summary, ViewQuery};

pub struct ListSession<S: Slot, C: Clock = SystemClock> {
    profile: ListProfile,
    store: RecordStore<S>,
    clock: C,
    records: Vec<Record>,
}

impl<S: Slot, C: Clock> ListSession<S, C> {
    /// Load the profile's records from `slot`
    pub fn open(profile: ListProfile, slot: S, clock: C) -> Self {
        let store = RecordStore::new(slot, profile.storage_key.clone());
        let records = store.load(clock.now_ms());
        info!("[session] opened {} with {} records", profile.name, records.len());
        Self {
            profile,
            store,
            clock,
            records,
        }
    }

    pub fn profile(&self) -> &ListProfile {
        &self.profile
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn now(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Discard in-memory state and read the slot again
    pub fn reload(&mut self) {
        self.records = self.store.load(self.clock.now_ms());
    }

    // ========================
    // Mutations
    // ========================

    /// Values for an empty add form; dated profiles start at today
    pub fn blank_fields(&self) -> RawFields {
        let mut raw = RawFields::default();
        if self.profile.has_field(Field::Date) {
            raw.date = self.clock.today().format("%Y-%m-%d").to_string();
        }
        raw
    }

    /// Validate form input and prepend a new record. A dated profile
    /// stamps a blank date with today.
    pub fn create(&mut self, raw: &RawFields) -> Result<Record, ValidationError> {
        let mut draft = RecordDraft::from_raw(&self.profile, raw)?;
        if self.profile.has_field(Field::Date) && draft.date.is_none() {
            draft.date = Some(self.clock.today());
        }
        Ok(self.create_draft(draft))
    }

    pub fn create_draft(&mut self, draft: RecordDraft) -> Record {
        let record = mutators::create(&mut self.records, draft, self.clock.now_ms());
        self.persist();
        record
    }

    /// Replace the content of `id` with validated form input.
    /// `Ok(None)` when the record is gone.
    pub fn update(&mut self, id: &RecordId, raw: &RawFields) -> Result<Option<Record>, ValidationError> {
        let patch = RecordDraft::from_raw(&self.profile, raw)?.into_patch(&self.profile);
        Ok(self.patch(id, patch))
    }

    pub fn patch(&mut self, id: &RecordId, patch: RecordPatch) -> Option<Record> {
        let now = self.clock.now_ms();
        let updated = mutators::update(&mut self.records, id, patch, now).cloned()?;
        self.persist();
        Some(updated)
    }

    pub fn toggle_flag(&mut self, id: &RecordId, flag: Flag) -> Option<bool> {
        let value = mutators::toggle_flag(&mut self.records, id, flag, self.clock.now_ms())?;
        self.persist();
        Some(value)
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<Record> {
        let removed = mutators::remove(&mut self.records, id)?;
        self.persist();
        Some(removed)
    }

    pub fn duplicate(&mut self, id: &RecordId) -> Option<Record> {
        let now = self.clock.now_ms();
        let copy = mutators::duplicate(&mut self.records, id, &self.profile.copy_suffix, now)?;
        self.persist();
        Some(copy)
    }

    pub fn clear(&mut self, scope: ClearScope) -> usize {
        let removed = mutators::clear(&mut self.records, |record| scope.matches(record));
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn adjust_quantity(&mut self, id: &RecordId, delta: i64) -> Option<QuantityChange> {
        let change = mutators::adjust_quantity(&mut self.records, id, delta, self.clock.now_ms())?;
        self.persist();
        Some(change)
    }

    // ========================
    // Derived views
    // ========================

    pub fn visible(&self, query: &ViewQuery) -> Vec<&Record> {
        view::visible(&self.records, query, &self.profile, self.clock.now_ms())
    }

    pub fn summary(&self, query: &ViewQuery) -> Summary {
        let visible = self.visible(query).len();
        view::summarize(&self.records, visible, &self.profile, self.clock.now_ms())
    }

    pub fn export(&self) -> Result<Export, ExportError> {
        export::export(&self.records, &self.profile)
    }

    /// Write the sequence to the store. Failures are logged; the
    /// in-memory sequence stays authoritative.
    pub fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("[session] failed to persist {}: {}", self.profile.name, e);
        }
    }

    pub fn try_persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.records)
    }
}
