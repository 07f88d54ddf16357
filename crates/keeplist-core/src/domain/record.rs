//! Record Entity
//!
//! One user-visible list entry: a note, a task, a transaction or a cart
//! line. All variants share this shape; a profile decides which fields
//! are meaningful.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Entity, RecordId};

const PREVIEW_CHARS: usize = 70;

/// Boolean attributes that drive display priority or completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    /// Completion status
    Done,
    /// Prioritized display: pinned records always list first
    Pinned,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Done => "done",
            Flag::Pinned => "pinned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "done" => Some(Flag::Done),
            "pinned" => Some(Flag::Pinned),
            _ => None,
        }
    }
}

/// A stored list record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier, stable for the record's lifetime
    pub id: RecordId,
    /// Primary text (task text, note title, transaction or product title)
    pub text: String,
    /// Long-form content (note body)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Signed amount for transactions, unit price for cart lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Calendar date a transaction applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub done: bool,
    pub pinned: bool,
    /// Milliseconds since epoch
    pub created_at: i64,
    /// Milliseconds since epoch, never below `created_at`
    pub updated_at: i64,
    /// Keys this version does not know about, kept so a save does not drop them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create a record with empty content and both timestamps at `now`
    pub fn new(id: RecordId, text: impl Into<String>, now: i64) -> Self {
        Self {
            id,
            text: text.into(),
            body: None,
            category: None,
            amount: None,
            quantity: None,
            date: None,
            done: false,
            pinned: false,
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }

    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Done => self.done,
            Flag::Pinned => self.pinned,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Done => self.done = value,
            Flag::Pinned => self.pinned = value,
        }
    }

    /// Refresh `updated_at`, keeping it at or above `created_at`
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now.max(self.created_at);
    }

    /// Amount times quantity; a missing quantity counts as one unit
    pub fn line_total(&self) -> Option<f64> {
        self.amount
            .map(|amount| amount * f64::from(self.quantity.unwrap_or(1)))
    }

    /// Single-line excerpt of the body for list rows
    pub fn preview(&self) -> String {
        let collapsed = self
            .body
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if collapsed.is_empty() {
            return "No content…".to_string();
        }
        collapsed.chars().take(PREVIEW_CHARS).collect()
    }

    pub fn word_count(&self) -> usize {
        self.body
            .as_deref()
            .map(|body| body.split_whitespace().count())
            .unwrap_or(0)
    }

    /// Build a record from loosely-typed stored JSON.
    ///
    /// Returns `None` only when `value` is not an object. Malformed fields
    /// fall back to defaults; a missing id is left empty for the caller to
    /// replace.
    pub fn from_value(value: &Value, now: i64) -> Option<Self> {
        let object = value.as_object()?;
        let mut extra = Map::new();
        for (key, field) in object {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                extra.insert(key.clone(), field.clone());
            }
        }

        let created_at = object
            .get("createdAt")
            .and_then(coerce_i64)
            .unwrap_or(now);
        let updated_at = object
            .get("updatedAt")
            .and_then(coerce_i64)
            .unwrap_or(created_at)
            .max(created_at);

        Some(Self {
            id: object
                .get("id")
                .and_then(coerce_string)
                .unwrap_or_default()
                .into(),
            text: pick(object, "text", "title")
                .and_then(coerce_string)
                .unwrap_or_default(),
            body: pick(object, "body", "content").and_then(coerce_string),
            category: object.get("category").and_then(coerce_string),
            amount: object.get("amount").and_then(coerce_f64),
            quantity: object.get("quantity").and_then(coerce_u32),
            date: object.get("date").and_then(coerce_date),
            done: object.get("done").map(coerce_bool).unwrap_or(false),
            pinned: object.get("pinned").map(coerce_bool).unwrap_or(false),
            created_at,
            updated_at,
            extra,
        })
    }
}

impl Entity for Record {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

const KNOWN_KEYS: &[&str] = &[
    "id",
    "text",
    "title",
    "body",
    "content",
    "category",
    "amount",
    "quantity",
    "date",
    "done",
    "pinned",
    "createdAt",
    "updatedAt",
];

// ========================
// Lenient field coercion
// ========================

fn pick<'a>(object: &'a Map<String, Value>, primary: &str, alias: &str) -> Option<&'a Value> {
    object.get(primary).or_else(|| object.get(alias))
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Truthiness: empty strings, zero, NaN and null are false
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    f.is_finite().then_some(f)
}

fn coerce_i64(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    coerce_f64(value).map(|f| f as i64)
}

fn coerce_u32(value: &Value) -> Option<u32> {
    coerce_f64(value)
        .filter(|f| *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

fn coerce_date(value: &Value) -> Option<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_creation() {
        let record = Record::new("a".into(), "Buy milk", 100);
        assert_eq!(record.text, "Buy milk");
        assert_eq!(record.created_at, record.updated_at);
        assert!(!record.done);
        assert!(!record.pinned);
    }

    #[test]
    fn test_from_value_coerces_loose_fields() {
        let value = json!({
            "id": 42,
            "title": "Groceries",
            "content": "eggs\n  and   milk",
            "pinned": 1,
            "done": "",
            "amount": "-12.5",
            "createdAt": "1000",
            "updatedAt": 500,
            "color": "red"
        });
        let record = Record::from_value(&value, 9_999).unwrap();
        assert_eq!(record.id.as_str(), "42");
        assert_eq!(record.text, "Groceries");
        assert_eq!(record.preview(), "eggs and milk");
        assert!(record.pinned);
        assert!(!record.done);
        assert_eq!(record.amount, Some(-12.5));
        assert_eq!(record.created_at, 1000);
        // clamped up to createdAt
        assert_eq!(record.updated_at, 1000);
        assert_eq!(record.extra.get("color"), Some(&json!("red")));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Record::from_value(&json!("nope"), 0).is_none());
        assert!(Record::from_value(&json!([1, 2]), 0).is_none());
    }

    #[test]
    fn test_missing_timestamps_default_to_now() {
        let record = Record::from_value(&json!({"id": "x", "text": "t"}), 777).unwrap();
        assert_eq!(record.created_at, 777);
        assert_eq!(record.updated_at, 777);
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent_fields() {
        let record = Record::new("r1".into(), "Note", 5);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "r1",
                "text": "Note",
                "done": false,
                "pinned": false,
                "createdAt": 5,
                "updatedAt": 5
            })
        );
    }

    #[test]
    fn test_line_total_and_word_count() {
        let mut record = Record::new("c".into(), "Mug", 0);
        record.amount = Some(9.5);
        record.quantity = Some(3);
        assert_eq!(record.line_total(), Some(28.5));

        record.body = Some("  one two\tthree ".to_string());
        assert_eq!(record.word_count(), 3);
    }

    #[test]
    fn test_preview_truncates_and_handles_empty() {
        let mut record = Record::new("n".into(), "Note", 0);
        assert_eq!(record.preview(), "No content…");
        record.body = Some("x".repeat(100));
        assert_eq!(record.preview().chars().count(), 70);
    }

    #[test]
    fn test_flag_parse() {
        assert_eq!(Flag::parse("done"), Some(Flag::Done));
        assert_eq!(Flag::parse("pinned"), Some(Flag::Pinned));
        assert_eq!(Flag::parse("starred"), None);
    }
}
