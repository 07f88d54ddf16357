//! Application Context
//!
//! Owns the open `ListSession` and the reactive store mirroring it.
//! Components send intents here by record id; every intent runs the
//! matching session call, then refreshes the mirror.

use gloo_timers::callback::Timeout;
use keeplist_core::{
    view, Clock, Export, ListSession, QuantityChange, SystemClock, UiSettings,
};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::download;
use crate::models::{
    ClearScope, Filter, Flag, ListProfile, RawFields, Record, RecordId, SortKey, Summary, Toast,
    ToastKind,
};
use crate::storage::LocalStorageSlot;
use crate::store::{
    store_push_toast, store_remove_toast, store_set_records, AppState, AppStateStoreFields,
    AppStore,
};

pub type Session = ListSession<LocalStorageSlot, SystemClock>;

/// How long a toast stays on screen
const TOAST_MS: u32 = 1600;

/// App-wide handle provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    store: AppStore,
    session: StoredValue<Session>,
    settings: StoredValue<UiSettings>,
    next_toast: StoredValue<u32>,
}

impl AppContext {
    /// Open the last used profile and seed the store from it
    pub fn open() -> Self {
        let settings = UiSettings::load(&LocalStorageSlot);
        let profile = settings.resolve_profile();
        let session = ListSession::open(profile.clone(), LocalStorageSlot, SystemClock);
        let mut query = crate::models::ViewQuery::for_profile(&profile);
        query.sort = settings.sort_for(&profile);

        let store = Store::new(AppState::new(profile, session.records().to_vec(), query));
        Self {
            store,
            session: StoredValue::new(session),
            settings: StoredValue::new(settings),
            next_toast: StoredValue::new(0),
        }
    }

    pub fn store(&self) -> AppStore {
        self.store
    }

    /// Run `f` against the session and refresh the record mirror
    fn mutate<U>(&self, f: impl FnOnce(&mut Session) -> U) -> Option<U> {
        let result = self.session.try_update_value(f);
        self.session
            .with_value(|session| store_set_records(&self.store, session.records()));
        result
    }

    fn noun(&self) -> String {
        self.store.profile().with_untracked(|profile| profile.noun.clone())
    }

    // ========================
    // Derived views
    // ========================

    /// Visible list for the current query; tracks the store
    pub fn visible_records(&self) -> Vec<Record> {
        let query = self.store.query().get();
        let profile = self.store.profile().read();
        let records = self.store.records().read();
        view::visible(&records, &query, &profile, SystemClock.now_ms())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Visible list without subscribing, for use inside event handlers
    fn visible_untracked(&self) -> Vec<Record> {
        let query = self.store.query().get_untracked();
        self.session
            .with_value(|session| session.visible(&query).into_iter().cloned().collect())
    }

    pub fn summary(&self, visible: usize) -> Summary {
        let profile = self.store.profile().read();
        let records = self.store.records().read();
        view::summarize(&records, visible, &profile, SystemClock.now_ms())
    }

    /// Values an empty add form starts from
    pub fn blank_fields(&self) -> RawFields {
        self.session.with_value(|session| session.blank_fields())
    }

    /// Categories in use, for filter chips
    pub fn categories(&self) -> Vec<String> {
        view::categories(&self.store.records().read())
    }

    // ========================
    // Record intents
    // ========================

    /// Validate and add a record. Returns whether it was added.
    pub fn create(&self, raw: &RawFields) -> bool {
        match self.mutate(|session| session.create(raw)) {
            Some(Ok(record)) => {
                log::info!("[APP] created {}", record.id);
                self.select(&record.id);
                self.notify(format!("Added {}", self.noun()), ToastKind::Info);
                true
            }
            Some(Err(e)) => {
                self.notify(e.to_string(), ToastKind::Error);
                false
            }
            None => false,
        }
    }

    /// Replace the content of `id` with form input. Returns whether it was saved.
    pub fn update(&self, id: &RecordId, raw: &RawFields) -> bool {
        match self.mutate(|session| session.update(id, raw)) {
            Some(Ok(Some(_))) => {
                self.notify(format!("Saved {}", self.noun()), ToastKind::Info);
                true
            }
            Some(Ok(None)) | None => false,
            Some(Err(e)) => {
                self.notify(e.to_string(), ToastKind::Error);
                false
            }
        }
    }

    pub fn toggle_flag(&self, id: &RecordId, flag: Flag) {
        let _ = self.mutate(|session| session.toggle_flag(id, flag));
    }

    pub fn remove(&self, id: &RecordId) {
        let Some(removed) = self.mutate(|session| session.remove(id)).flatten() else {
            return;
        };
        let visible = self.visible_untracked();
        let refs: Vec<&Record> = visible.iter().collect();
        let mut selection = self.store.selection().get_untracked();
        selection.after_remove(&removed.id, &refs);
        self.store.selection().set(selection);
        self.notify(format!("Deleted {}", self.noun()), ToastKind::Info);
    }

    pub fn duplicate(&self, id: &RecordId) {
        if let Some(copy) = self.mutate(|session| session.duplicate(id)).flatten() {
            self.select(&copy.id);
            self.notify(format!("Duplicated {}", self.noun()), ToastKind::Info);
        }
    }

    pub fn clear(&self, scope: ClearScope) {
        let removed = self.mutate(|session| session.clear(scope)).unwrap_or(0);
        if removed > 0 {
            self.notify(format!("Cleared {} {}(s)", removed, self.noun()), ToastKind::Info);
        }
    }

    pub fn adjust_quantity(&self, id: &RecordId, delta: i64) {
        if let Some(Some(QuantityChange::Removed)) =
            self.mutate(|session| session.adjust_quantity(id, delta))
        {
            self.notify(format!("Removed {}", self.noun()), ToastKind::Info);
        }
    }

    /// Download the open list in its profile's format
    pub fn export(&self) {
        let result: Option<Result<Export, _>> = self.session.try_with_value(|session| session.export());
        match result {
            Some(Ok(export)) => match download::offer(&export) {
                Ok(()) => self.notify(format!("Exported {}", export.filename), ToastKind::Info),
                Err(e) => {
                    log::error!("[APP] download failed: {}", e);
                    self.notify("Download failed".to_string(), ToastKind::Error);
                }
            },
            Some(Err(e)) => self.notify(e.to_string(), ToastKind::Error),
            None => {}
        }
    }

    // ========================
    // Selection
    // ========================

    pub fn select(&self, id: &RecordId) {
        let visible = self.visible_untracked();
        let refs: Vec<&Record> = visible.iter().collect();
        self.store.selection().write().select(id, &refs);
    }

    /// Fall back to the first visible record when the selection is gone
    pub fn reconcile_selection(&self, visible: &[Record]) {
        let refs: Vec<&Record> = visible.iter().collect();
        let current = self.store.selection().get_untracked();
        let mut next = current.clone();
        next.reconcile(&refs);
        if next != current {
            self.store.selection().set(next);
        }
    }

    // ========================
    // Query and profile
    // ========================

    pub fn set_search(&self, search: String) {
        self.store.query().write().search = search;
    }

    pub fn set_filter(&self, filter: Filter) {
        self.store.query().write().filter = filter;
    }

    pub fn set_sort(&self, sort: Option<SortKey>) {
        self.store.query().write().sort = sort;
        let profile = self.store.profile().get_untracked();
        self.settings.update_value(|settings| settings.set_sort(&profile, sort));
        self.save_settings();
    }

    /// Switch to another built-in profile
    pub fn open_profile(&self, name: &str) {
        let Some(profile) = ListProfile::by_name(name) else {
            log::warn!("[APP] unknown profile {}", name);
            return;
        };
        if self.store.profile().with_untracked(|open| open.name == profile.name) {
            return;
        }

        let sort = self.settings.with_value(|settings| settings.sort_for(&profile));
        self.settings
            .update_value(|settings| settings.profile = profile.name.clone());
        self.save_settings();

        let session = ListSession::open(profile.clone(), LocalStorageSlot, SystemClock);
        store_set_records(&self.store, session.records());
        self.session.set_value(session);

        let mut query = crate::models::ViewQuery::for_profile(&profile);
        query.sort = sort;
        self.store.query().set(query);
        self.store.selection().set(Default::default());
        self.store.profile().set(profile);
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.with_value(|settings| settings.save(&LocalStorageSlot)) {
            log::warn!("[APP] failed to save settings: {}", e);
        }
    }

    // ========================
    // Toasts
    // ========================

    /// Show a toast that dismisses itself
    pub fn notify(&self, message: String, kind: ToastKind) {
        if kind == ToastKind::Error {
            log::warn!("[APP] {}", message);
        }
        let id = self.next_toast.with_value(|id| *id);
        self.next_toast.set_value(id.wrapping_add(1));
        store_push_toast(&self.store, Toast { id, message, kind });

        let store = self.store;
        Timeout::new(TOAST_MS, move || store_remove_toast(&store, id)).forget();
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
