//! UI Settings
//!
//! Which profile is open and the sort chosen for each profile, kept in a
//! slot key of their own.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::ListProfile;
use crate::repository::{Slot, StoreError};
use crate::view::SortKey;

pub const SETTINGS_KEY: &str = "keeplist.settings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Name of the open profile
    pub profile: String,
    /// Last sort chosen per profile name; `None` is an explicit choice
    /// of stored order
    pub sorts: BTreeMap<String, Option<SortKey>>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            profile: ListProfile::default().name,
            sorts: BTreeMap::new(),
        }
    }
}

impl UiSettings {
    /// Read settings; anything unreadable yields the defaults
    pub fn load<S: Slot>(slot: &S) -> Self {
        match slot.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("[settings] ignoring unreadable settings: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("[settings] read failed: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: Slot>(&self, slot: &S) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        slot.set(SETTINGS_KEY, &json)?;
        Ok(())
    }

    /// The saved profile, falling back to the default for unknown names
    pub fn resolve_profile(&self) -> ListProfile {
        ListProfile::by_name(&self.profile).unwrap_or_default()
    }

    /// Saved sort for `profile`, else its default. A saved sort the
    /// profile does not offer is ignored.
    pub fn sort_for(&self, profile: &ListProfile) -> Option<SortKey> {
        match self.sorts.get(&profile.name) {
            Some(None) => None,
            Some(Some(sort)) if profile.sorts.contains(sort) => Some(*sort),
            _ => profile.default_sort,
        }
    }

    pub fn set_sort(&mut self, profile: &ListProfile, sort: Option<SortKey>) {
        self.sorts.insert(profile.name.clone(), sort);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemorySlot;

    #[test]
    fn test_missing_or_corrupt_settings_use_defaults() {
        assert_eq!(UiSettings::load(&MemorySlot::new()), UiSettings::default());
        let slot = MemorySlot::with_value(SETTINGS_KEY, "[1,2");
        assert_eq!(UiSettings::load(&slot), UiSettings::default());
    }

    #[test]
    fn test_settings_persist() {
        let slot = MemorySlot::new();
        let expenses = ListProfile::expenses();
        let mut settings = UiSettings {
            profile: expenses.name.clone(),
            ..Default::default()
        };
        settings.set_sort(&expenses, Some(SortKey::AmountDesc));
        settings.save(&slot).unwrap();

        let loaded = UiSettings::load(&slot);
        assert_eq!(loaded.resolve_profile().name, "expenses");
        assert_eq!(loaded.sort_for(&expenses), Some(SortKey::AmountDesc));
    }

    #[test]
    fn test_unknown_profile_falls_back() {
        let settings = UiSettings {
            profile: "recipes".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.resolve_profile(), ListProfile::default());
    }

    #[test]
    fn test_sort_not_offered_uses_profile_default() {
        let notes = ListProfile::notes();
        let mut settings = UiSettings::default();
        settings.sorts.insert(notes.name.clone(), Some(SortKey::AmountAsc));
        assert_eq!(settings.sort_for(&notes), notes.default_sort);
    }

    #[test]
    fn test_stored_order_choice_survives_reload() {
        let slot = MemorySlot::new();
        let notes = ListProfile::notes();
        assert_eq!(UiSettings::default().sort_for(&notes), Some(SortKey::UpdatedDesc));

        let mut settings = UiSettings::default();
        settings.set_sort(&notes, None);
        settings.save(&slot).unwrap();

        assert_eq!(UiSettings::load(&slot).sort_for(&notes), None);
    }
}
