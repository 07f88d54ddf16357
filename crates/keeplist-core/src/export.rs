//! Export
//!
//! Renders the record sequence as a downloadable JSON or CSV document.

use chrono::DateTime;
use thiserror::Error;

use crate::domain::{ExportFormat, Field, ListProfile, Record};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data to export")]
    Empty,
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A rendered export, ready to hand to a download
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub filename: String,
    pub mime: &'static str,
    pub contents: String,
}

/// Export in the profile's preferred format
pub fn export(records: &[Record], profile: &ListProfile) -> Result<Export, ExportError> {
    export_as(records, profile, profile.export_format)
}

pub fn export_as(
    records: &[Record],
    profile: &ListProfile,
    format: ExportFormat,
) -> Result<Export, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }
    let export = match format {
        ExportFormat::Json => Export {
            filename: format!("{}.json", profile.export_name),
            mime: "application/json",
            contents: to_json(records)?,
        },
        ExportFormat::Csv => Export {
            filename: format!("{}.csv", profile.export_name),
            mime: "text/csv;charset=utf-8",
            contents: to_csv(records, &profile.export_columns),
        },
    };
    Ok(export)
}

/// Pretty-printed JSON array of the records
pub fn to_json(records: &[Record]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Header row plus one row per record. Every cell is double-quoted with
/// inner quotes doubled; cells join with `,` and rows with `\n`.
pub fn to_csv(records: &[Record], columns: &[Field]) -> String {
    let header = columns.iter().map(|column| quote(column.header()));
    let mut rows = vec![header.collect::<Vec<_>>().join(",")];
    for record in records {
        let row = columns
            .iter()
            .map(|column| quote(&cell(record, *column)))
            .collect::<Vec<_>>()
            .join(",");
        rows.push(row);
    }
    rows.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn cell(record: &Record, column: Field) -> String {
    match column {
        Field::Text => record.text.clone(),
        Field::Body => record.body.clone().unwrap_or_default(),
        Field::Category => record.category.clone().unwrap_or_default(),
        Field::Amount => record.amount.map(|a| a.to_string()).unwrap_or_default(),
        Field::Quantity => record.quantity.map(|q| q.to_string()).unwrap_or_default(),
        Field::Date => record
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Field::Done => record.done.to_string(),
        Field::Pinned => record.pinned.to_string(),
        Field::Created => timestamp(record.created_at),
        Field::Updated => timestamp(record.updated_at),
    }
}

fn timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
