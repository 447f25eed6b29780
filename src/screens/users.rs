use crate::domain::user::User;
use crate::query::SortKey;
use crate::screens::{DEFAULT_TRUNCATE_AT, FilterField, ScreenSpec};
use crate::table::{Cell, ListEntity, RowFormat, rows_of};

pub static USERS: ScreenSpec = ScreenSpec {
    key: "users",
    title: "Users",
    noun: "User",
    resource: "/api/system/users",
    mutations: Some("/api/system/users"),
    export: None,
    sort: SortKey::asc("username"),
    page_size: 10,
    filters: &[
        FilterField::Text("usernameSearch"),
        FilterField::Text("emailSearch"),
    ],
    columns: &["ID", "Username", "Real name", "Email", "Enabled", "Roles"],
    empty_message: "No users found.",
    truncate_at: DEFAULT_TRUNCATE_AT,
    decode_rows: rows_of::<User>,
};

impl ListEntity for User {
    fn record_id(&self) -> Option<i64> {
        Some(self.id.get())
    }

    fn cells(&self, _format: &RowFormat) -> Vec<Cell> {
        let enabled = if self.enabled {
            Cell::badge("Yes", "success")
        } else {
            Cell::badge("No", "secondary")
        };

        vec![
            Cell::text(self.id.to_string()),
            Cell::optional(self.username.as_deref()),
            Cell::optional(self.real_name.as_deref()),
            Cell::optional(self.email.as_deref()),
            enabled,
            Cell::text(self.role_names().unwrap_or_else(|| "None".to_string())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_username_renders_as_not_available() {
        let rows = rows_of::<User>(
            vec![json!({"id": 3, "username": null, "email": "x@example.com", "enabled": false})],
            &USERS.row_format(),
        )
        .unwrap();

        assert_eq!(rows[0].id, Some(3));
        assert_eq!(rows[0].cells[1].text, "N/A");
        assert_eq!(rows[0].cells[4].text, "No");
        assert_eq!(rows[0].cells[5].text, "None");
    }

    #[test]
    fn roles_are_joined() {
        let rows = rows_of::<User>(
            vec![json!({
                "id": 1,
                "username": "alice",
                "enabled": true,
                "roles": [{"name": "ADMIN"}, {"name": "AUDITOR"}, {"name": null}]
            })],
            &USERS.row_format(),
        )
        .unwrap();

        assert_eq!(rows[0].cells[4].badge, Some("success"));
        assert_eq!(rows[0].cells[5].text, "ADMIN, AUDITOR");
    }

    #[test]
    fn null_roles_and_flag_keep_the_rest_of_the_page() {
        let rows = (USERS.decode_rows)(
            vec![
                json!({"id": 1, "username": "a", "enabled": true, "roles": null}),
                json!({"id": 2, "username": "b", "enabled": null, "roles": [{"name": "ADMIN"}]}),
            ],
            &USERS.row_format(),
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[4].text, "Yes");
        assert_eq!(rows[0].cells[5].text, "None");
        assert_eq!(rows[1].cells[4].text, "No");
        assert_eq!(rows[1].cells[5].text, "ADMIN");
    }
}
