//! Selection State
//!
//! At most one record is selected. The selection follows the visible
//! list: when the selected record disappears from it, the first visible
//! record takes over.

use crate::domain::{Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(RecordId),
}

impl Selection {
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.id() == Some(id)
    }

    /// Select `id` if it is in the visible list; otherwise nothing changes
    pub fn select(&mut self, id: &RecordId, visible: &[&Record]) {
        if visible.iter().any(|record| &record.id == id) {
            *self = Selection::Selected(id.clone());
        }
    }

    /// Keep the selection valid for `visible`: fall back to the first
    /// visible record, or `None` when the list is empty
    pub fn reconcile(&mut self, visible: &[&Record]) {
        let still_visible = self
            .id()
            .is_some_and(|id| visible.iter().any(|record| &record.id == id));
        if !still_visible {
            *self = first_of(visible);
        }
    }

    /// Transition after `removed` was deleted. `visible` is the list
    /// computed after the removal.
    pub fn after_remove(&mut self, removed: &RecordId, visible: &[&Record]) {
        if self.is_selected(removed) {
            *self = first_of(visible);
        } else {
            self.reconcile(visible);
        }
    }
}

fn first_of(visible: &[&Record]) -> Selection {
    visible
        .first()
        .map(|record| Selection::Selected(record.id.clone()))
        .unwrap_or(Selection::None)
}
