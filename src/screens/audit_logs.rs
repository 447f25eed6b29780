use crate::domain::audit_log::AuditLog;
use crate::query::SortKey;
use crate::screens::{DEFAULT_TRUNCATE_AT, FilterField, ScreenSpec};
use crate::table::{Cell, ListEntity, RowFormat, rows_of};

pub static AUDIT_LOGS: ScreenSpec = ScreenSpec {
    key: "audit-logs",
    title: "Audit logs",
    noun: "Audit log entry",
    resource: "/api/system/audit-logs",
    mutations: None,
    export: Some("/api/system/audit-logs/export"),
    sort: SortKey::desc("timestamp"),
    page_size: 10,
    filters: &[
        FilterField::Text("username"),
        FilterField::Text("action"),
        FilterField::DateRange {
            start: "startDate",
            end: "endDate",
        },
    ],
    columns: &["ID", "User", "Action", "Details", "Time"],
    empty_message: "No audit log entries found.",
    truncate_at: DEFAULT_TRUNCATE_AT,
    decode_rows: rows_of::<AuditLog>,
};

impl ListEntity for AuditLog {
    fn record_id(&self) -> Option<i64> {
        self.id.map(|id| id.get())
    }

    fn cells(&self, format: &RowFormat) -> Vec<Cell> {
        vec![
            Cell::optional(self.id.map(|id| id.to_string()).as_deref()),
            Cell::optional(self.username.as_deref()),
            Cell::optional(self.action.as_deref()),
            Cell::truncated(self.details.as_deref(), format.truncate_at),
            Cell::timestamp(self.timestamp.as_deref()),
        ]
    }
}
