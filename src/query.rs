//! Query strings for the backend's paginated search endpoints.
//!
//! Paging and sort parameters are always emitted. Filter values come from a
//! [`FilterState`] and only the fields a screen declares are read from it.

use std::fmt::{Display, Formatter};

use crate::domain::filter::FilterState;
use crate::screens::{FilterField, ScreenSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Default ordering of a screen, rendered as `field,direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub direction: Direction,
}

impl SortKey {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.field, self.direction.as_str())
    }
}

/// Non-fatal problems found while composing a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryWarning {
    /// Only one bound of a date range was filled in; both were left out.
    PartialDateRange {
        present: &'static str,
        missing: &'static str,
    },
}

impl Display for QueryWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryWarning::PartialDateRange { present, missing } => write!(
                f,
                "date range has `{present}` but no `{missing}`; both bounds omitted"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    /// Encoded query string without the leading `?`.
    pub query: String,
    pub warnings: Vec<QueryWarning>,
}

/// Builder for a list request of one screen.
#[derive(Debug, Clone)]
pub struct ListQuery<'a> {
    screen: &'a ScreenSpec,
    page: usize,
    size: usize,
    filters: Option<&'a FilterState>,
}

impl<'a> ListQuery<'a> {
    /// First page with the screen's default size and no filters.
    pub fn new(screen: &'a ScreenSpec) -> Self {
        Self {
            screen,
            page: 0,
            size: screen.page_size,
            filters: None,
        }
    }

    pub fn paginate(mut self, page: usize, size: usize) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    pub fn filters(mut self, filters: &'a FilterState) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn build(&self) -> BuiltQuery {
        let mut query = format!(
            "page={}&size={}&sort={}",
            self.page, self.size, self.screen.sort
        );
        let mut warnings = Vec::new();

        if let Some(filters) = self.filters {
            let (pairs, found) = filter_pairs(self.screen.filters, filters);
            warnings = found;
            for (key, value) in pairs {
                query.push('&');
                query.push_str(&encode_pair(key, value));
            }
        }

        BuiltQuery { query, warnings }
    }
}

/// Filters only, as expected by the CSV export endpoints.
pub fn export_query(screen: &ScreenSpec, filters: &FilterState) -> BuiltQuery {
    let (pairs, warnings) = filter_pairs(screen.filters, filters);
    let query = pairs
        .into_iter()
        .map(|(key, value)| encode_pair(key, value))
        .collect::<Vec<_>>()
        .join("&");
    BuiltQuery { query, warnings }
}

/// Query string of the console's own list links, so filters survive paging.
pub fn link_query(page: usize, filters: &FilterState) -> String {
    let mut query = format!("page={page}");
    for (key, value) in filters.iter() {
        query.push('&');
        query.push_str(&encode_pair(key, value));
    }
    query
}

fn encode_pair(key: &str, value: &str) -> String {
    format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(value)
    )
}

fn filter_pairs<'f>(
    fields: &[FilterField],
    filters: &'f FilterState,
) -> (Vec<(&'static str, &'f str)>, Vec<QueryWarning>) {
    let mut pairs = Vec::new();
    let mut warnings = Vec::new();

    for field in fields {
        match *field {
            FilterField::Text(param) => {
                if let Some(value) = filters.get(param) {
                    pairs.push((param, value));
                }
            }
            FilterField::DateRange { start, end } => {
                match (filters.get(start), filters.get(end)) {
                    (Some(from), Some(to)) => {
                        pairs.push((start, from));
                        pairs.push((end, to));
                    }
                    (Some(_), None) => warnings.push(QueryWarning::PartialDateRange {
                        present: start,
                        missing: end,
                    }),
                    (None, Some(_)) => warnings.push(QueryWarning::PartialDateRange {
                        present: end,
                        missing: start,
                    }),
                    (None, None) => {}
                }
            }
        }
    }

    (pairs, warnings)
}
