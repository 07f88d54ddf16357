//! Drafts and Patches
//!
//! Raw form values come in as untyped strings. They are validated against
//! the active profile before any mutation runs.

use chrono::NaiveDate;
use thiserror::Error;

use super::entity::RecordId;
use super::profile::{AmountRule, Field, ListProfile};
use super::record::Record;

/// Rejected input; nothing was mutated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("text must not be empty")]
    EmptyText,
    #[error("amount is not a number: {0:?}")]
    InvalidAmount(String),
    #[error("amount must not be zero")]
    ZeroAmount,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("quantity must be a whole number of at least 1: {0:?}")]
    InvalidQuantity(String),
    #[error("date must look like YYYY-MM-DD: {0:?}")]
    InvalidDate(String),
}

/// Form values exactly as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub text: String,
    pub body: String,
    pub category: String,
    pub amount: String,
    pub quantity: String,
    pub date: String,
}

impl RawFields {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Form values that reproduce `record`'s content, for edit forms
    pub fn from_record(record: &Record) -> Self {
        Self {
            text: record.text.clone(),
            body: record.body.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
            amount: record.amount.map(|a| a.to_string()).unwrap_or_default(),
            quantity: record.quantity.map(|q| q.to_string()).unwrap_or_default(),
            date: record
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Validated content for a new record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub text: String,
    pub body: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub quantity: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl RecordDraft {
    /// Draft with only text set
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            body: None,
            category: None,
            amount: None,
            quantity: None,
            date: None,
        }
    }

    /// Validate raw form values for `profile`
    pub fn from_raw(profile: &ListProfile, raw: &RawFields) -> Result<Self, ValidationError> {
        let text = match raw.text.trim() {
            "" => profile
                .untitled
                .clone()
                .ok_or(ValidationError::EmptyText)?,
            trimmed => trimmed.to_string(),
        };

        let body = profile.has_field(Field::Body).then(|| raw.body.clone());

        let category = if profile.has_field(Field::Category) {
            Some(raw.category.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        } else {
            None
        };

        let amount = parse_amount(profile.amount_rule, &raw.amount)?;

        let quantity = if profile.has_field(Field::Quantity) {
            Some(parse_quantity(&raw.quantity)?)
        } else {
            None
        };

        let date = match raw.date.trim() {
            "" => None,
            _ if !profile.has_field(Field::Date) => None,
            trimmed => Some(
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map_err(|_| ValidationError::InvalidDate(raw.date.clone()))?,
            ),
        };

        Ok(Self {
            text,
            body,
            category,
            amount,
            quantity,
            date,
        })
    }

    /// Materialize as a record with both timestamps at `now`
    pub fn into_record(self, id: RecordId, now: i64) -> Record {
        let mut record = Record::new(id, self.text, now);
        record.body = self.body;
        record.category = self.category;
        record.amount = self.amount;
        record.quantity = self.quantity;
        record.date = self.date;
        record
    }

    /// Patch replacing every field `profile` edits. A blank optional
    /// field clears the stored value.
    pub fn into_patch(self, profile: &ListProfile) -> RecordPatch {
        let edits = |field: Field| profile.has_field(field);
        RecordPatch {
            text: Some(self.text),
            body: edits(Field::Body).then_some(self.body),
            category: edits(Field::Category).then_some(self.category),
            amount: (profile.amount_rule != AmountRule::Absent).then_some(self.amount),
            quantity: edits(Field::Quantity).then_some(self.quantity),
            date: edits(Field::Date).then_some(self.date),
        }
    }
}

/// Partial content update. An outer `None` leaves a field unchanged,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub text: Option<String>,
    pub body: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub amount: Option<Option<f64>>,
    pub quantity: Option<Option<u32>>,
    pub date: Option<Option<NaiveDate>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply content changes. Flags and timestamps are left to the caller.
    pub fn apply(self, record: &mut Record) {
        if let Some(text) = self.text {
            record.text = text;
        }
        if let Some(body) = self.body {
            record.body = body;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(date) = self.date {
            record.date = date;
        }
    }
}

fn parse_amount(rule: AmountRule, raw: &str) -> Result<Option<f64>, ValidationError> {
    if rule == AmountRule::Absent {
        return Ok(None);
    }
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidAmount(raw.to_string()))?;
    let rounded = (value * 100.0).round() / 100.0;
    match rule {
        AmountRule::NonZero if rounded == 0.0 => Err(ValidationError::ZeroAmount),
        AmountRule::Positive if rounded <= 0.0 => Err(ValidationError::NonPositiveAmount),
        _ => Ok(Some(rounded)),
    }
}

fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    match raw.trim() {
        "" => Ok(1),
        trimmed => trimmed
            .parse::<u32>()
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| ValidationError::InvalidQuantity(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_requires_text() {
        let profile = ListProfile::todo();
        let err = RecordDraft::from_raw(&profile, &RawFields::text("   ")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyText);

        let draft = RecordDraft::from_raw(&profile, &RawFields::text("  Buy milk ")).unwrap();
        assert_eq!(draft.text, "Buy milk");
        assert_eq!(draft.body, None);
    }

    #[test]
    fn test_notes_fall_back_to_untitled() {
        let profile = ListProfile::notes();
        let raw = RawFields {
            body: "first line".to_string(),
            ..Default::default()
        };
        let draft = RecordDraft::from_raw(&profile, &raw).unwrap();
        assert_eq!(draft.text, "Untitled");
        assert_eq!(draft.body.as_deref(), Some("first line"));
    }

    #[test]
    fn test_expense_amount_rules() {
        let profile = ListProfile::expenses();
        let mut raw = RawFields::text("Lunch");

        raw.amount = "abc".to_string();
        assert!(matches!(
            RecordDraft::from_raw(&profile, &raw),
            Err(ValidationError::InvalidAmount(_))
        ));

        raw.amount = "0".to_string();
        assert_eq!(
            RecordDraft::from_raw(&profile, &raw).unwrap_err(),
            ValidationError::ZeroAmount
        );

        raw.amount = "-12.346".to_string();
        raw.date = "2024-03-05".to_string();
        raw.category = " Food ".to_string();
        let draft = RecordDraft::from_raw(&profile, &raw).unwrap();
        assert_eq!(draft.amount, Some(-12.35));
        assert_eq!(draft.category.as_deref(), Some("Food"));
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let profile = ListProfile::expenses();
        let raw = RawFields {
            text: "Rent".to_string(),
            amount: "-500".to_string(),
            date: "05/03/2024".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            RecordDraft::from_raw(&profile, &raw),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_cart_price_and_quantity() {
        let profile = ListProfile::cart();
        let mut raw = RawFields::text("Mug");
        raw.amount = "-1".to_string();
        assert_eq!(
            RecordDraft::from_raw(&profile, &raw).unwrap_err(),
            ValidationError::NonPositiveAmount
        );

        raw.amount = "9.99".to_string();
        raw.quantity = "0".to_string();
        assert!(matches!(
            RecordDraft::from_raw(&profile, &raw),
            Err(ValidationError::InvalidQuantity(_))
        ));

        raw.quantity = String::new();
        let draft = RecordDraft::from_raw(&profile, &raw).unwrap();
        assert_eq!(draft.quantity, Some(1));
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut record = Record::new("r".into(), "Old", 10);
        record.body = Some("keep".to_string());
        RecordPatch {
            text: Some("New".to_string()),
            ..Default::default()
        }
        .apply(&mut record);
        assert_eq!(record.text, "New");
        assert_eq!(record.body.as_deref(), Some("keep"));
        assert_eq!(record.updated_at, 10);
    }

    #[test]
    fn test_patch_clears_blank_fields_of_the_profile() {
        let profile = ListProfile::expenses();
        let mut record = Record::new("r".into(), "Rent", 10);
        record.category = Some("Bills".to_string());
        record.body = Some("kept".to_string());

        let raw = RawFields {
            text: "Rent".to_string(),
            amount: "-5".to_string(),
            ..Default::default()
        };
        RecordDraft::from_raw(&profile, &raw)
            .unwrap()
            .into_patch(&profile)
            .apply(&mut record);
        assert_eq!(record.category, None);
        assert_eq!(record.amount, Some(-5.0));
        // expenses never edit the body
        assert_eq!(record.body.as_deref(), Some("kept"));
    }

    #[test]
    fn test_edit_form_round_trips_record_content() {
        let profile = ListProfile::expenses();
        let raw = RawFields {
            text: "Rent".to_string(),
            amount: "-850.5".to_string(),
            category: "Bills".to_string(),
            date: "2024-03-01".to_string(),
            ..Default::default()
        };
        let record = RecordDraft::from_raw(&profile, &raw)
            .unwrap()
            .into_record("r".into(), 0);
        let again = RecordDraft::from_raw(&profile, &RawFields::from_record(&record)).unwrap();
        assert_eq!(again.into_record("r".into(), 0), record);
    }
}
