//! Record Store
//!
//! Mirrors the full record sequence into one slot key as a JSON array.
//! Reads never fail: anything unreadable loads as an empty list.

use std::collections::HashSet;

use log::{debug, warn};
use serde_json::Value;
use thiserror::Error;

use super::traits::{Slot, SlotError};
use crate::domain::{Record, RecordId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write slot: {0}")]
    Slot(#[from] SlotError),
}

pub struct RecordStore<S: Slot> {
    slot: S,
    key: String,
}

impl<S: Slot> RecordStore<S> {
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Read the persisted sequence.
    ///
    /// Absent values, unreadable slots, invalid JSON and non-array roots
    /// all yield an empty list. `now` fills in missing timestamps and
    /// seeds replacement ids.
    pub fn load(&self, now: i64) -> Vec<Record> {
        let raw = match self.slot.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("[store] read of {} failed, starting empty: {}", self.key, e);
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                warn!("[store] {} is not an array, starting empty", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("[store] {} is not valid JSON, starting empty: {}", self.key, e);
                return Vec::new();
            }
        };

        let records = decode_records(&items, now);
        debug!("[store] loaded {} records from {}", records.len(), self.key);
        records
    }

    /// Serialize the full sequence and overwrite the slot
    pub fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.slot.set(&self.key, &json)?;
        debug!("[store] saved {} records to {}", records.len(), self.key);
        Ok(())
    }
}

/// Decode array elements leniently, dropping non-objects and assigning
/// fresh ids where an id is missing or already taken.
fn decode_records(items: &[Value], now: i64) -> Vec<Record> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let Some(mut record) = Record::from_value(item, now) else {
            debug!("[store] dropping element {} (not an object)", index);
            continue;
        };
        if record.id.as_str().is_empty() || seen.contains(&record.id) {
            let fresh = RecordId::generate(now);
            debug!("[store] element {} reassigned id {:?} -> {}", index, record.id.as_str(), fresh);
            record.id = fresh;
        }
        seen.insert(record.id.clone());
        records.push(record);
    }

    records
}
