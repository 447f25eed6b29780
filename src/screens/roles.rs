use crate::domain::role::Role;
use crate::query::SortKey;
use crate::screens::{DEFAULT_TRUNCATE_AT, FilterField, ScreenSpec};
use crate::table::{Cell, ListEntity, RowFormat, rows_of};

pub static ROLES: ScreenSpec = ScreenSpec {
    key: "roles",
    title: "Roles",
    noun: "Role",
    resource: "/api/system/roles",
    mutations: Some("/api/system/roles"),
    export: None,
    sort: SortKey::asc("name"),
    page_size: 10,
    filters: &[
        FilterField::Text("nameSearch"),
        FilterField::Text("descriptionSearch"),
    ],
    columns: &["ID", "Name", "Description", "Functionalities"],
    empty_message: "No roles found.",
    truncate_at: DEFAULT_TRUNCATE_AT,
    decode_rows: rows_of::<Role>,
};

impl ListEntity for Role {
    fn record_id(&self) -> Option<i64> {
        Some(self.id.get())
    }

    fn cells(&self, format: &RowFormat) -> Vec<Cell> {
        vec![
            Cell::text(self.id.to_string()),
            Cell::optional(self.name.as_deref()),
            Cell::truncated(self.description.as_deref(), format.truncate_at),
            Cell::truncated(
                self.functionality_labels().as_deref(),
                format.truncate_at * 2,
            ),
        ]
    }
}
