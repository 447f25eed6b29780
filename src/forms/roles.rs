use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{FunctionalityName, RoleName, optional_text};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a role.
pub struct AddRoleForm {
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub description: String,
    #[serde(default)]
    pub functionality_names: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRolePayload {
    pub name: RoleName,
    pub description: Option<String>,
    pub functionality_names: Vec<FunctionalityName>,
}

impl TryFrom<AddRoleForm> for NewRolePayload {
    type Error = FormError;

    fn try_from(form: AddRoleForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: RoleName::new(form.name)?,
            description: optional_text(&form.description),
            functionality_names: form
                .functionality_names
                .into_iter()
                .filter_map(|name| FunctionalityName::new(name).ok())
                .collect(),
        })
    }
}
