//! Frontend Models
//!
//! Core list types plus UI-only data.

pub use keeplist_core::{
    ClearScope, Field, Filter, Flag, ListProfile, RawFields, Record, RecordId, Selection, SortKey,
    Summary, ViewQuery,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
}

/// Money with two decimals and an explicit sign for negatives
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-{:.2}", amount.abs())
    } else {
        format!("{:.2}", amount)
    }
}

/// Local date-time for a millisecond timestamp
pub fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(-3.456), "-3.46");
        assert_eq!(format_amount(0.0), "0.00");
    }
}
