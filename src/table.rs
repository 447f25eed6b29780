//! Table rows built from decoded records.
//!
//! Every screen turns its records into plain [`Cell`]s; the view decides how
//! a cell is drawn.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::page::{PageShapeError, decode_records};

/// Placeholder for a missing optional value.
pub const NOT_AVAILABLE: &str = "N/A";

const ELLIPSIS: &str = "...";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    /// Full value when `text` was shortened.
    pub title: Option<String>,
    /// Bootstrap colour when the cell is drawn as a badge.
    pub badge: Option<&'static str>,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: value.into(),
            title: None,
            badge: None,
        }
    }

    /// `N/A` for missing or blank values; anything else is shown unchanged.
    pub fn optional(value: Option<&str>) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => Self::text(value),
            None => Self::text(NOT_AVAILABLE),
        }
    }

    pub fn badge(value: impl Into<String>, colour: &'static str) -> Self {
        Self {
            badge: Some(colour),
            ..Self::text(value)
        }
    }

    /// Shortens long values to `max_chars`, keeping the full value as title.
    pub fn truncated(value: Option<&str>, max_chars: usize) -> Self {
        let cell = Self::optional(value);
        match truncate(&cell.text, max_chars) {
            Some(short) => Self {
                title: Some(cell.text),
                text: short,
                badge: None,
            },
            None => cell,
        }
    }

    pub fn timestamp(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Self::text(format_timestamp(raw)),
            None => Self::text(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Backend id, used by row actions.
    pub id: Option<i64>,
    pub cells: Vec<Cell>,
}

/// Per-screen rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFormat {
    pub truncate_at: usize,
}

/// A record that can be shown as one table row.
pub trait ListEntity: DeserializeOwned {
    fn record_id(&self) -> Option<i64>;

    fn cells(&self, format: &RowFormat) -> Vec<Cell>;
}

/// Decodes page content into rows of `E`.
pub fn rows_of<E: ListEntity>(
    content: Vec<Value>,
    format: &RowFormat,
) -> Result<Vec<TableRow>, PageShapeError> {
    let records: Vec<E> = decode_records(content)?;

    Ok(records
        .iter()
        .map(|entity| TableRow {
            id: entity.record_id(),
            cells: entity.cells(format),
        })
        .collect())
}

/// Returns the shortened text when `value` is longer than `max_chars`.
///
/// The result is `max_chars - 3` characters followed by `...`.
pub fn truncate(value: &str, max_chars: usize) -> Option<String> {
    if value.chars().count() <= max_chars {
        return None;
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut short: String = value.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    Some(short)
}

/// Formats ISO-8601 timestamps, dates and epoch milliseconds (as UTC);
/// anything else is returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(parsed) = raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
        {
            return parsed.format(TIMESTAMP_FORMAT).to_string();
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
