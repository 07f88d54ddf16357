//! Keeplist Core
//!
//! Layered architecture:
//! - domain: records, profiles, input validation
//! - repository: key-value slots and the record store
//! - mutators / view / selection: list operations over the in-memory sequence
//! - session: explicit state tying the above to persistence
//! - settings: persisted UI choices

pub mod clock;
pub mod domain;
pub mod export;
pub mod mutators;
pub mod repository;
pub mod selection;
pub mod session;
pub mod settings;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::{
    AmountRule, Entity, ExportFormat, Field, Flag, ListProfile, RawFields, Record, RecordDraft,
    RecordId, RecordPatch, ValidationError,
};
pub use export::{Export, ExportError};
pub use mutators::{ClearScope, QuantityChange};
pub use repository::{MemorySlot, RecordStore, Slot, SlotError, StoreError};
pub use selection::Selection;
pub use session::ListSession;
pub use settings::UiSettings;
pub use view::{AmountSummary, Filter, SortKey, Summary, ViewQuery};

#[cfg(not(target_arch = "wasm32"))]
pub use repository::FileSlot;
