use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{EmailAddress, RoleName, Username, optional_text};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a system user.
pub struct AddUserForm {
    #[validate(length(min = 4, max = 40))]
    pub username: String,
    #[validate(length(min = 6, max = 120))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub email: String,
    #[serde(default)]
    pub real_name: String,
    /// Checkbox; present when ticked.
    #[serde(default)]
    pub enabled: Option<String>,
    #[serde(default)]
    pub role_names: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserPayload {
    pub username: Username,
    pub password: String,
    pub email: Option<EmailAddress>,
    pub real_name: Option<String>,
    pub enabled: bool,
    pub role_names: Vec<RoleName>,
}

impl TryFrom<AddUserForm> for NewUserPayload {
    type Error = FormError;

    fn try_from(form: AddUserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let email = match optional_text(&form.email) {
            Some(email) => Some(EmailAddress::new(email)?),
            None => None,
        };
        let role_names = form
            .role_names
            .into_iter()
            .filter_map(|name| RoleName::new(name).ok())
            .collect();

        Ok(Self {
            username: Username::new(form.username)?,
            password: form.password,
            email,
            real_name: optional_text(&form.real_name),
            enabled: form.enabled.is_some_and(|v| v != "false"),
            role_names,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for editing a user; the login name cannot change.
pub struct EditUserForm {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub email: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub enabled: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub email: Option<EmailAddress>,
    pub real_name: Option<String>,
    pub enabled: bool,
}

impl TryFrom<EditUserForm> for UpdateUserPayload {
    type Error = FormError;

    fn try_from(form: EditUserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let email = match optional_text(&form.email) {
            Some(email) => Some(EmailAddress::new(email)?),
            None => None,
        };

        Ok(Self {
            email,
            real_name: optional_text(&form.real_name),
            enabled: form.enabled.is_some_and(|v| v != "false"),
        })
    }
}

#[derive(Debug, Deserialize)]
/// Checked roles of the assign-roles form. No boxes ticked clears every role.
pub struct AssignRolesForm {
    #[serde(default)]
    pub role_names: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolesPayload {
    pub role_names: Vec<RoleName>,
}

impl From<AssignRolesForm> for AssignRolesPayload {
    fn from(form: AssignRolesForm) -> Self {
        Self {
            role_names: form
                .role_names
                .into_iter()
                .filter_map(|name| RoleName::new(name).ok())
                .collect(),
        }
    }
}
