//! Browser Local Storage
//!
//! `Slot` over `window.localStorage`. The storage handle is looked up on
//! every call, so a disabled or missing store surfaces as a `SlotError`
//! instead of a panic.

use keeplist_core::{Slot, SlotError};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSlot;

impl LocalStorageSlot {
    fn storage() -> Result<web_sys::Storage, SlotError> {
        let window = web_sys::window().ok_or_else(|| SlotError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| SlotError::Unavailable(js_message(&e)))?
            .ok_or_else(|| SlotError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl Slot for LocalStorageSlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| SlotError::Unavailable(js_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        // quota errors land here
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| SlotError::WriteRejected(js_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| SlotError::WriteRejected(js_message(&e)))
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
