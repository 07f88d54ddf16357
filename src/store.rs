//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store
//! mirrors the open session; it is written only through `AppContext`.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{ListProfile, Record, Selection, Toast, ViewQuery};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Profile of the open list
    pub profile: ListProfile,
    /// Full record sequence, in stored order
    pub records: Vec<Record>,
    /// Search, filter and sort the visible list is derived from
    pub query: ViewQuery,
    pub selection: Selection,
    /// Notifications currently on screen
    pub toasts: Vec<Toast>,
}

impl AppState {
    pub fn new(profile: ListProfile, records: Vec<Record>, query: ViewQuery) -> Self {
        Self {
            profile,
            records,
            query,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the mirrored records
pub fn store_set_records(store: &AppStore, records: &[Record]) {
    *store.records().write() = records.to_vec();
}

pub fn store_push_toast(store: &AppStore, toast: Toast) {
    store.toasts().write().push(toast);
}

pub fn store_remove_toast(store: &AppStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}
