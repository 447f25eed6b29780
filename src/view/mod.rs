//! Render targets of the list controller.

use std::sync::Arc;

use serde::Serialize;

use crate::controller::ListState;
use crate::domain::filter::FilterState;
use crate::pagination::PageControl;
use crate::table::TableRow;

#[cfg(feature = "server")]
pub mod html;

/// Bootstrap contextual colour of alerts and placeholder rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Info,
    Warning,
    Danger,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Info => "info",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub tone: Tone,
    pub message: String,
}

impl Alert {
    pub fn new(tone: Tone, message: impl Into<String>) -> Self {
        Self {
            tone,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Tone::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Tone::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Tone::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Tone::Danger, message)
    }
}

/// Content of the table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody {
    Loading,
    Rows { rows: Vec<TableRow> },
    /// A single full-width row: empty state or error.
    Placeholder { message: String, tone: Tone },
}

/// Everything a view needs to draw one list screen.
///
/// Each snapshot replaces the previous one entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
    pub screen: &'static str,
    pub title: &'static str,
    pub state: ListState,
    pub columns: &'static [&'static str],
    pub body: TableBody,
    pub pagination: Vec<PageControl>,
    pub alerts: Vec<Alert>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_elements: u64,
    pub filters: FilterState,
    /// Whether rows offer a delete action.
    pub editable: bool,
    /// Set once the session is gone; views navigate here instead of drawing.
    pub redirect: Option<String>,
}

impl ListSnapshot {
    /// Number of data rows, not counting placeholders.
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows { rows } => rows.len(),
            TableBody::Loading | TableBody::Placeholder { .. } => 0,
        }
    }

    /// Number of `<tr>` elements the body occupies.
    pub fn body_rows(&self) -> usize {
        match &self.body {
            TableBody::Rows { rows } => rows.len(),
            TableBody::Loading | TableBody::Placeholder { .. } => 1,
        }
    }
}

pub trait ListView: Send + Sync {
    /// Draws `snapshot`, replacing whatever was drawn before.
    fn render(&self, snapshot: &ListSnapshot);
}

impl<T: ListView + ?Sized> ListView for Arc<T> {
    fn render(&self, snapshot: &ListSnapshot) {
        (**self).render(snapshot)
    }
}
