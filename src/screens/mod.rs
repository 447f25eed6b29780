//! Static description of every management screen.
//!
//! A [`ScreenSpec`] is all the list controller needs to know about an entity
//! type: where to fetch it, how to sort and filter it and how its records
//! become table rows.

use serde_json::Value;

use crate::domain::page::PageShapeError;
use crate::query::SortKey;
use crate::table::{RowFormat, TableRow};

mod audit_logs;
mod contracts;
mod customers;
mod functionalities;
mod roles;
mod users;

pub use audit_logs::AUDIT_LOGS;
pub use contracts::CONTRACTS;
pub use customers::CUSTOMERS;
pub use functionalities::FUNCTIONALITIES;
pub use roles::ROLES;
pub use users::USERS;

/// Default truncation threshold for long text columns.
pub const DEFAULT_TRUNCATE_AT: usize = 40;

/// A search input bound to backend query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Text(&'static str),
    /// Both bounds are sent together or not at all.
    DateRange {
        start: &'static str,
        end: &'static str,
    },
}

pub type RowDecoder = fn(Vec<Value>, &RowFormat) -> Result<Vec<TableRow>, PageShapeError>;

#[derive(Debug)]
pub struct ScreenSpec {
    /// Route segment of the screen, e.g. `audit-logs`.
    pub key: &'static str,
    pub title: &'static str,
    /// Singular record name used in alerts.
    pub noun: &'static str,
    /// Backend search endpoint.
    pub resource: &'static str,
    /// Backend endpoint for create/update/delete, when the screen supports it.
    pub mutations: Option<&'static str>,
    /// Backend CSV export endpoint.
    pub export: Option<&'static str>,
    pub sort: SortKey,
    pub page_size: usize,
    pub filters: &'static [FilterField],
    pub columns: &'static [&'static str],
    pub empty_message: &'static str,
    pub truncate_at: usize,
    pub decode_rows: RowDecoder,
}

impl ScreenSpec {
    pub fn row_format(&self) -> RowFormat {
        RowFormat {
            truncate_at: self.truncate_at,
        }
    }

    /// Whether `param` is one of this screen's filter parameters.
    pub fn accepts_filter(&self, param: &str) -> bool {
        self.filters.iter().any(|field| match field {
            FilterField::Text(name) => *name == param,
            FilterField::DateRange { start, end } => *start == param || *end == param,
        })
    }
}

pub static SCREENS: [&ScreenSpec; 6] = [
    &USERS,
    &ROLES,
    &FUNCTIONALITIES,
    &CUSTOMERS,
    &CONTRACTS,
    &AUDIT_LOGS,
];

/// Looks up a screen by its route segment.
pub fn find(key: &str) -> Option<&'static ScreenSpec> {
    SCREENS.iter().copied().find(|screen| screen.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screens_are_found_by_key() {
        assert_eq!(find("audit-logs").map(|s| s.resource), Some("/api/system/audit-logs"));
        assert!(find("invoices").is_none());
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in SCREENS.iter().enumerate() {
            for b in &SCREENS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn declared_filters_are_accepted() {
        assert!(AUDIT_LOGS.accepts_filter("startDate"));
        assert!(AUDIT_LOGS.accepts_filter("endDate"));
        assert!(USERS.accepts_filter("emailSearch"));
        assert!(!USERS.accepts_filter("page"));
    }

    #[test]
    fn columns_match_rendered_cells() {
        use serde_json::json;

        let samples = [
            (&USERS, json!({"id": 1, "username": "a", "enabled": true, "roles": []})),
            (&ROLES, json!({"id": 1, "name": "ADMIN"})),
            (&FUNCTIONALITIES, json!({"id": 1, "num": "F1"})),
            (&CUSTOMERS, json!({"id": 1})),
            (&CONTRACTS, json!({"id": 1})),
            (&AUDIT_LOGS, json!({"id": 1})),
        ];

        for (screen, record) in samples {
            let rows = (screen.decode_rows)(vec![record], &screen.row_format()).unwrap();
            assert_eq!(rows[0].cells.len(), screen.columns.len(), "{}", screen.key);
        }
    }
}
