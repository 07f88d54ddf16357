//! Domain Layer - Core Entity Trait
//!
//! Every stored entity carries a stable identifier; list operations
//! resolve entities by that identifier and never by position.

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + fmt::Debug;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Position of the entity with `id` in `items`, if present
pub fn position_of<T: Entity>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Opaque record identifier, generated client-side
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier. `now_ms` seeds the time component so
    /// ids sort roughly by creation.
    pub fn generate(now_ms: i64) -> Self {
        let ts = u64::try_from(now_ms).unwrap_or_default();
        Self(Ulid::from_parts(ts, rand::random::<u128>()).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RecordId::generate(1_700_000_000_000);
        let b = RecordId::generate(1_700_000_000_000);
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 26);
    }

    #[test]
    fn test_negative_timestamp_still_generates() {
        let id = RecordId::generate(-5);
        assert!(!id.as_str().is_empty());
    }
}
