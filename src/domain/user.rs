use serde::Deserialize;

use crate::domain::fields::null_as_default;
use crate::domain::types::UserId;

/// Role reference embedded in a user record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleRef {
    pub name: Option<String>,
}

/// System user as returned by `/api/system/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub real_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<RoleRef>,
}

impl User {
    /// Comma separated role names, `None` when the user has no named role.
    pub fn role_names(&self) -> Option<String> {
        let names: Vec<&str> = self
            .roles
            .iter()
            .filter_map(|role| role.name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    }
}
