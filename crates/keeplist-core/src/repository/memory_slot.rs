//! In-memory slot. Clones share the same map, so a second store built
//! over a clone sees what the first one saved (a simulated reload).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::traits::{Slot, SlotError};

#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `value` under `key`
    pub fn with_value(key: &str, value: &str) -> Self {
        let slot = Self::new();
        slot.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        slot
    }

    /// Raw stored value, for assertions
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl Slot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let slot = MemorySlot::new();
        let other = slot.clone();
        slot.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
        other.remove("k").unwrap();
        assert_eq!(slot.get("k").unwrap(), None);
    }
}
