//! View Model
//!
//! Derives the visible list from the full record sequence: filter, then
//! search, then a stable sort, then a stable pinned-first partition.
//! Nothing here mutates the records it reads.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{Field, ListProfile, Record};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Status or category membership a record must satisfy to be visible
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    /// Not done
    Active,
    Done,
    Pinned,
    /// Updated within the profile's recent window
    Recent,
    /// Positive amount
    Income,
    /// Negative amount
    Expense,
    Category(String),
}

impl Filter {
    /// Stable string form, used as chip and select values
    pub fn key(&self) -> String {
        match self {
            Filter::All => "all".to_string(),
            Filter::Active => "active".to_string(),
            Filter::Done => "done".to_string(),
            Filter::Pinned => "pinned".to_string(),
            Filter::Recent => "recent".to_string(),
            Filter::Income => "income".to_string(),
            Filter::Expense => "expense".to_string(),
            Filter::Category(name) => format!("category:{name}"),
        }
    }

    /// Inverse of [`Filter::key`]; unknown keys fall back to `All`
    pub fn parse(key: &str) -> Self {
        match key {
            "active" => Filter::Active,
            "done" => Filter::Done,
            "pinned" => Filter::Pinned,
            "recent" => Filter::Recent,
            "income" => Filter::Income,
            "expense" => Filter::Expense,
            other => other
                .strip_prefix("category:")
                .map(|name| Filter::Category(name.to_string()))
                .unwrap_or(Filter::All),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Filter::All => "All".to_string(),
            Filter::Active => "Active".to_string(),
            Filter::Done => "Done".to_string(),
            Filter::Pinned => "Pinned".to_string(),
            Filter::Recent => "Recent".to_string(),
            Filter::Income => "Income".to_string(),
            Filter::Expense => "Expense".to_string(),
            Filter::Category(name) => name.clone(),
        }
    }

    fn matches(&self, record: &Record, profile: &ListProfile, now: i64) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !record.done,
            Filter::Done => record.done,
            Filter::Pinned => record.pinned,
            Filter::Recent => record.updated_at >= now - profile.recent_days * DAY_MS,
            Filter::Income => record.amount.is_some_and(|a| a > 0.0),
            Filter::Expense => record.amount.is_some_and(|a| a < 0.0),
            Filter::Category(name) => record.category.as_deref() == Some(name.as_str()),
        }
    }
}

/// Primary ordering of the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    UpdatedDesc,
    UpdatedAsc,
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    TitleDesc,
    AmountDesc,
    AmountAsc,
    DateDesc,
    DateAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::UpdatedDesc => "updated_desc",
            SortKey::UpdatedAsc => "updated_asc",
            SortKey::CreatedDesc => "created_desc",
            SortKey::CreatedAsc => "created_asc",
            SortKey::TitleAsc => "title_asc",
            SortKey::TitleDesc => "title_desc",
            SortKey::AmountDesc => "amount_desc",
            SortKey::AmountAsc => "amount_asc",
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
        }
    }

    /// `None` for unknown keys, which leave the source order untouched
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "updated_desc" => Some(SortKey::UpdatedDesc),
            "updated_asc" => Some(SortKey::UpdatedAsc),
            "created_desc" => Some(SortKey::CreatedDesc),
            "created_asc" => Some(SortKey::CreatedAsc),
            "title_asc" => Some(SortKey::TitleAsc),
            "title_desc" => Some(SortKey::TitleDesc),
            "amount_desc" => Some(SortKey::AmountDesc),
            "amount_asc" => Some(SortKey::AmountAsc),
            "date_desc" => Some(SortKey::DateDesc),
            "date_asc" => Some(SortKey::DateAsc),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::UpdatedDesc => "Recently updated",
            SortKey::UpdatedAsc => "Oldest updated",
            SortKey::CreatedDesc => "Newest first",
            SortKey::CreatedAsc => "Oldest first",
            SortKey::TitleAsc => "Title A-Z",
            SortKey::TitleDesc => "Title Z-A",
            SortKey::AmountDesc => "Amount high-low",
            SortKey::AmountAsc => "Amount low-high",
            SortKey::DateDesc => "Date newest",
            SortKey::DateAsc => "Date oldest",
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
            SortKey::UpdatedAsc => a.updated_at.cmp(&b.updated_at),
            SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
            SortKey::CreatedAsc => a.created_at.cmp(&b.created_at),
            SortKey::TitleAsc => title_key(a).cmp(&title_key(b)),
            SortKey::TitleDesc => title_key(b).cmp(&title_key(a)),
            SortKey::AmountDesc => amount_key(b).total_cmp(&amount_key(a)),
            SortKey::AmountAsc => amount_key(a).total_cmp(&amount_key(b)),
            SortKey::DateDesc => b.date.cmp(&a.date),
            SortKey::DateAsc => a.date.cmp(&b.date),
        }
    }
}

fn title_key(record: &Record) -> String {
    record.text.to_lowercase()
}

fn amount_key(record: &Record) -> f64 {
    record.line_total().unwrap_or(0.0)
}

/// Transient UI state the visible list is derived from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewQuery {
    pub search: String,
    pub filter: Filter,
    pub sort: Option<SortKey>,
}

impl ViewQuery {
    /// Query starting from the profile's default sort
    pub fn for_profile(profile: &ListProfile) -> Self {
        Self {
            sort: profile.default_sort,
            ..Default::default()
        }
    }
}

/// Compute the visible list for `query`
pub fn visible<'a>(
    records: &'a [Record],
    query: &ViewQuery,
    profile: &ListProfile,
    now: i64,
) -> Vec<&'a Record> {
    let term = query.search.trim().to_lowercase();

    let mut list: Vec<&Record> = records
        .iter()
        .filter(|record| query.filter.matches(record, profile, now))
        .filter(|record| term.is_empty() || matches_search(record, &profile.search_fields, &term))
        .collect();

    if let Some(sort) = query.sort {
        list.sort_by(|a, b| sort.compare(a, b));
    }
    // stable: keeps the primary order inside each partition
    list.sort_by_key(|record| !record.pinned);
    list
}

fn matches_search(record: &Record, fields: &[Field], term: &str) -> bool {
    fields.iter().any(|field| {
        let haystack = match field {
            Field::Text => Some(record.text.as_str()),
            Field::Body => record.body.as_deref(),
            Field::Category => record.category.as_deref(),
            _ => None,
        };
        haystack.is_some_and(|h| h.to_lowercase().contains(term))
    })
}

/// Money totals for amount-bearing profiles
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AmountSummary {
    /// Sum of positive line totals
    pub income: f64,
    /// Absolute sum of negative line totals
    pub expense: f64,
    /// Signed sum of all line totals
    pub balance: f64,
    /// Signed sum of line totals dated in the current month
    pub this_month: f64,
    /// Sum of quantities, one per line without quantity
    pub units: u64,
}

/// Counts shown next to the list
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub done: usize,
    pub pinned: usize,
    pub visible: usize,
    pub amounts: Option<AmountSummary>,
}

/// Summarize the full sequence; `visible` is the length of the current
/// visible list
pub fn summarize(records: &[Record], visible: usize, profile: &ListProfile, now: i64) -> Summary {
    let amounts = profile.has_field(Field::Amount).then(|| {
        let today = DateTime::from_timestamp_millis(now).map(|dt| dt.date_naive());
        let mut summary = AmountSummary::default();
        for record in records {
            let Some(total) = record.line_total() else {
                continue;
            };
            if total > 0.0 {
                summary.income += total;
            } else {
                summary.expense += total.abs();
            }
            summary.balance += total;
            if record.date.zip(today).is_some_and(|(d, t)| same_month(d, t)) {
                summary.this_month += total;
            }
            summary.units += u64::from(record.quantity.unwrap_or(1));
        }
        summary
    });

    Summary {
        total: records.len(),
        done: records.iter().filter(|r| r.done).count(),
        pinned: records.iter().filter(|r| r.pinned).count(),
        visible,
        amounts,
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Distinct categories in use, sorted
pub fn categories(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
