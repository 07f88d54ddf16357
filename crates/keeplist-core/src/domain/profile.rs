//! List Profiles
//!
//! A profile configures the generic record list for one variant: which
//! fields and flags exist, how input is validated, what search covers
//! and how the list exports.

use serde::{Deserialize, Serialize};

use super::record::Flag;
use crate::view::{Filter, SortKey};

/// Record fields a profile can enable beyond `text`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Text,
    Body,
    Category,
    Amount,
    Quantity,
    Date,
    Done,
    Pinned,
    Created,
    Updated,
}

impl Field {
    /// Column header used by CSV export
    pub fn header(&self) -> &'static str {
        match self {
            Field::Text => "Title",
            Field::Body => "Content",
            Field::Category => "Category",
            Field::Amount => "Amount",
            Field::Quantity => "Quantity",
            Field::Date => "Date",
            Field::Done => "Done",
            Field::Pinned => "Pinned",
            Field::Created => "Created",
            Field::Updated => "Updated",
        }
    }
}

/// How a submitted amount is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountRule {
    /// Profile has no amount field
    #[default]
    Absent,
    /// Signed, any finite value except zero (income/expense)
    NonZero,
    /// Strictly positive (prices)
    Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

/// Configuration of one list variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListProfile {
    /// Short machine name, also used in the UI tab bar
    pub name: String,
    /// Display label
    pub label: String,
    /// Local-storage key holding the serialized records
    pub storage_key: String,
    /// Singular noun for messages ("note", "task", ...)
    pub noun: String,
    pub flags: Vec<Flag>,
    /// Content fields the add form and editor expose
    pub fields: Vec<Field>,
    pub search_fields: Vec<Field>,
    /// Filters offered as chips, in display order
    pub filters: Vec<Filter>,
    pub default_sort: Option<SortKey>,
    /// Sort options offered in the selector, in display order
    pub sorts: Vec<SortKey>,
    /// Window of the `Recent` filter
    pub recent_days: i64,
    /// Used when the submitted text is blank; `None` makes text required
    pub untitled: Option<String>,
    pub copy_suffix: String,
    pub amount_rule: AmountRule,
    /// Preset categories offered by the add form
    pub categories: Vec<String>,
    pub export_format: ExportFormat,
    pub export_columns: Vec<Field>,
    /// File name of the download, without extension
    pub export_name: String,
}

impl ListProfile {
    /// Notes: pinned notes with a title and markdown body
    pub fn notes() -> Self {
        Self {
            name: "notes".to_string(),
            label: "Notes".to_string(),
            storage_key: "keeplist.notes.v1".to_string(),
            noun: "note".to_string(),
            flags: vec![Flag::Pinned],
            fields: vec![Field::Text, Field::Body],
            search_fields: vec![Field::Text, Field::Body],
            filters: vec![Filter::All, Filter::Pinned, Filter::Recent],
            default_sort: Some(SortKey::UpdatedDesc),
            sorts: vec![
                SortKey::UpdatedDesc,
                SortKey::UpdatedAsc,
                SortKey::TitleAsc,
                SortKey::TitleDesc,
            ],
            recent_days: 3,
            untitled: Some("Untitled".to_string()),
            copy_suffix: " (copy)".to_string(),
            amount_rule: AmountRule::Absent,
            categories: Vec::new(),
            export_format: ExportFormat::Json,
            export_columns: vec![
                Field::Text,
                Field::Body,
                Field::Pinned,
                Field::Created,
                Field::Updated,
            ],
            export_name: "notes-export".to_string(),
        }
    }

    /// To-do: tasks with a done checkbox
    pub fn todo() -> Self {
        Self {
            name: "todo".to_string(),
            label: "To-do".to_string(),
            storage_key: "keeplist.todo.v1".to_string(),
            noun: "task".to_string(),
            flags: vec![Flag::Done, Flag::Pinned],
            fields: vec![Field::Text],
            search_fields: vec![Field::Text],
            filters: vec![Filter::All, Filter::Active, Filter::Done, Filter::Pinned],
            default_sort: None,
            sorts: vec![
                SortKey::CreatedDesc,
                SortKey::CreatedAsc,
                SortKey::TitleAsc,
                SortKey::TitleDesc,
            ],
            recent_days: 3,
            untitled: None,
            copy_suffix: " (copy)".to_string(),
            amount_rule: AmountRule::Absent,
            categories: Vec::new(),
            export_format: ExportFormat::Csv,
            export_columns: vec![Field::Text, Field::Done, Field::Pinned, Field::Created],
            export_name: "tasks".to_string(),
        }
    }

    /// Expenses: signed transactions with category and date
    pub fn expenses() -> Self {
        Self {
            name: "expenses".to_string(),
            label: "Expenses".to_string(),
            storage_key: "keeplist.expenses.v1".to_string(),
            noun: "transaction".to_string(),
            flags: Vec::new(),
            fields: vec![Field::Text, Field::Amount, Field::Category, Field::Date],
            search_fields: vec![Field::Text, Field::Category],
            filters: vec![Filter::All, Filter::Income, Filter::Expense],
            default_sort: None,
            sorts: vec![
                SortKey::DateDesc,
                SortKey::DateAsc,
                SortKey::AmountDesc,
                SortKey::AmountAsc,
            ],
            recent_days: 3,
            untitled: None,
            copy_suffix: " (copy)".to_string(),
            amount_rule: AmountRule::NonZero,
            categories: ["Food", "Transport", "Bills", "Shopping", "Salary", "Other"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            export_format: ExportFormat::Csv,
            export_columns: vec![Field::Text, Field::Amount, Field::Category, Field::Date],
            export_name: "transactions".to_string(),
        }
    }

    /// Cart: product lines with unit price and quantity
    pub fn cart() -> Self {
        Self {
            name: "cart".to_string(),
            label: "Cart".to_string(),
            storage_key: "keeplist.cart.v1".to_string(),
            noun: "item".to_string(),
            flags: Vec::new(),
            fields: vec![Field::Text, Field::Amount, Field::Quantity, Field::Category],
            search_fields: vec![Field::Text, Field::Category],
            filters: vec![Filter::All],
            default_sort: None,
            sorts: vec![SortKey::TitleAsc, SortKey::AmountDesc, SortKey::AmountAsc],
            recent_days: 3,
            untitled: None,
            copy_suffix: " (copy)".to_string(),
            amount_rule: AmountRule::Positive,
            categories: ["Accessories", "Tech", "Stationery", "Home"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            export_format: ExportFormat::Csv,
            export_columns: vec![Field::Text, Field::Category, Field::Amount, Field::Quantity],
            export_name: "cart".to_string(),
        }
    }

    /// All built-in profiles, in tab order
    pub fn builtin() -> Vec<Self> {
        vec![Self::notes(), Self::todo(), Self::expenses(), Self::cart()]
    }

    /// Look up a built-in profile by name
    pub fn by_name(name: &str) -> Option<Self> {
        Self::builtin().into_iter().find(|profile| profile.name == name)
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Text shown for a record whose text is blank
    pub fn display_text<'a>(&'a self, text: &'a str) -> &'a str {
        if text.trim().is_empty() {
            self.untitled.as_deref().unwrap_or("")
        } else {
            text
        }
    }
}

impl Default for ListProfile {
    fn default() -> Self {
        Self::notes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_have_distinct_keys() {
        let profiles = ListProfile::builtin();
        let mut keys: Vec<_> = profiles.iter().map(|p| p.storage_key.clone()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), profiles.len());
    }

    #[test]
    fn test_by_name() {
        assert_eq!(ListProfile::by_name("cart").unwrap().amount_rule, AmountRule::Positive);
        assert!(ListProfile::by_name("auth").is_none());
    }

    #[test]
    fn test_profile_roundtrips_through_json() {
        let profile = ListProfile::expenses();
        let json = serde_json::to_string(&profile).unwrap();
        let back: ListProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_display_text_falls_back_to_untitled() {
        let notes = ListProfile::notes();
        assert_eq!(notes.display_text("   "), "Untitled");
        assert_eq!(notes.display_text("Plan"), "Plan");
    }
}
