//! Domain Layer
//!
//! Core entities and business rules.

mod draft;
mod entity;
mod profile;
mod record;

pub use draft::{RawFields, RecordDraft, RecordPatch, ValidationError};
pub use entity::{position_of, Entity, RecordId};
pub use profile::{AmountRule, ExportFormat, Field, ListProfile};
pub use record::{Flag, Record};
