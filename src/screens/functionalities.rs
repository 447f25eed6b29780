use crate::domain::functionality::Functionality;
use crate::query::SortKey;
use crate::screens::{DEFAULT_TRUNCATE_AT, FilterField, ScreenSpec};
use crate::table::{Cell, ListEntity, RowFormat, rows_of};

pub static FUNCTIONALITIES: ScreenSpec = ScreenSpec {
    key: "functionalities",
    title: "Functionalities",
    noun: "Functionality",
    resource: "/api/system/functionalities",
    mutations: Some("/api/system/functionalities"),
    export: None,
    sort: SortKey::asc("id"),
    page_size: 10,
    filters: &[
        FilterField::Text("numSearch"),
        FilterField::Text("nameSearch"),
        FilterField::Text("descriptionSearch"),
    ],
    columns: &["ID", "Number", "Name", "URL", "Description"],
    empty_message: "No functionalities found.",
    truncate_at: DEFAULT_TRUNCATE_AT,
    decode_rows: rows_of::<Functionality>,
};

impl ListEntity for Functionality {
    fn record_id(&self) -> Option<i64> {
        Some(self.id.get())
    }

    fn cells(&self, format: &RowFormat) -> Vec<Cell> {
        vec![
            Cell::text(self.id.to_string()),
            Cell::optional(self.num.as_deref()),
            Cell::optional(self.name.as_deref()),
            Cell::optional(self.url.as_deref()),
            Cell::truncated(self.description.as_deref(), format.truncate_at),
        ]
    }
}
