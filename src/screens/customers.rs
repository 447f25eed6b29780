use crate::domain::customer::Customer;
use crate::query::SortKey;
use crate::screens::{DEFAULT_TRUNCATE_AT, FilterField, ScreenSpec};
use crate::table::{Cell, ListEntity, RowFormat, rows_of};

pub static CUSTOMERS: ScreenSpec = ScreenSpec {
    key: "customers",
    title: "Customers",
    noun: "Customer",
    resource: "/customers/api/search",
    mutations: None,
    export: None,
    sort: SortKey::asc("id"),
    page_size: 5,
    filters: &[FilterField::Text("keyword")],
    columns: &["Number", "Name", "Phone", "Email", "Address", "Created"],
    empty_message: "No customers found.",
    truncate_at: DEFAULT_TRUNCATE_AT,
    decode_rows: rows_of::<Customer>,
};

impl ListEntity for Customer {
    fn record_id(&self) -> Option<i64> {
        Some(self.id.get())
    }

    fn cells(&self, format: &RowFormat) -> Vec<Cell> {
        vec![
            Cell::optional(self.customer_number.as_deref()),
            Cell::optional(self.customer_name.as_deref()),
            Cell::optional(self.phone_number.as_deref()),
            Cell::optional(self.email.as_deref()),
            Cell::truncated(self.address.as_deref(), format.truncate_at),
            Cell::timestamp(self.created_at.as_deref()),
        ]
    }
}
