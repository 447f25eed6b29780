use crate::domain::contract::{Contract, ContractStatus, status_label};
use crate::query::SortKey;
use crate::screens::{DEFAULT_TRUNCATE_AT, FilterField, ScreenSpec};
use crate::table::{Cell, ListEntity, RowFormat, rows_of};

pub static CONTRACTS: ScreenSpec = ScreenSpec {
    key: "contracts",
    title: "Contracts",
    noun: "Contract",
    resource: "/reports/api/contracts/search",
    mutations: None,
    export: None,
    sort: SortKey::desc("createdAt"),
    page_size: 10,
    filters: &[
        FilterField::Text("contractName"),
        FilterField::Text("contractNumber"),
        FilterField::Text("status"),
    ],
    columns: &[
        "Number",
        "Name",
        "Customer",
        "Drafter",
        "Start date",
        "End date",
        "Status",
    ],
    empty_message: "No matching contracts found.",
    truncate_at: DEFAULT_TRUNCATE_AT,
    decode_rows: rows_of::<Contract>,
};

impl ListEntity for Contract {
    fn record_id(&self) -> Option<i64> {
        Some(self.id.get())
    }

    fn cells(&self, format: &RowFormat) -> Vec<Cell> {
        let status = match self.status.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => match ContractStatus::from_code(code) {
                Some(known) => Cell::badge(known.label(), known.badge()),
                None => Cell::text(status_label(code)),
            },
            _ => Cell::optional(None),
        };

        vec![
            Cell::optional(self.contract_number.as_deref()),
            Cell::truncated(self.contract_name.as_deref(), format.truncate_at),
            Cell::optional(
                self.customer
                    .as_ref()
                    .and_then(|c| c.customer_name.as_deref()),
            ),
            Cell::optional(self.drafter.as_ref().and_then(|d| d.username.as_deref())),
            Cell::optional(self.start_date.as_deref()),
            Cell::optional(self.end_date.as_deref()),
            status,
        ]
    }
}
