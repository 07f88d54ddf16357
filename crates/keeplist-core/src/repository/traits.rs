//! Repository Layer - Core Traits
//!
//! Defines the abstract interface to a persistent key-value slot.
//! Implementations can use browser local storage, files, in-memory, etc.

use thiserror::Error;

/// Errors raised by a slot backend
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    WriteRejected(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A synchronous key-value store holding whole serialized values.
///
/// A single `set` replaces the stored value; no partial writes.
pub trait Slot {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), SlotError>;

    /// Delete the value stored under `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<(), SlotError>;
}

impl<S: Slot + ?Sized> Slot for &S {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        (**self).remove(key)
    }
}
