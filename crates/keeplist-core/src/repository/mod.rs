//! Repository Layer
//!
//! Slot abstractions and the record store built on them.

mod memory_slot;
mod record_store;
mod traits;

#[cfg(not(target_arch = "wasm32"))]
mod file_slot;

#[cfg(test)]
mod tests;

pub use memory_slot::MemorySlot;
pub use record_store::{RecordStore, StoreError};
pub use traits::{Slot, SlotError};

#[cfg(not(target_arch = "wasm32"))]
pub use file_slot::FileSlot;
