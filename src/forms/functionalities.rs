use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{EndpointUrl, FunctionalityName, FunctionalityNum, optional_text};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a functionality.
pub struct AddFunctionalityForm {
    #[validate(length(min = 1, max = 10))]
    pub num: String,
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub url: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct NewFunctionalityPayload {
    pub num: FunctionalityNum,
    pub name: FunctionalityName,
    pub url: Option<EndpointUrl>,
    pub description: Option<String>,
}

impl TryFrom<AddFunctionalityForm> for NewFunctionalityPayload {
    type Error = FormError;

    fn try_from(form: AddFunctionalityForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let url = match optional_text(&form.url) {
            Some(url) => Some(EndpointUrl::new(url)?),
            None => None,
        };

        Ok(Self {
            num: FunctionalityNum::new(form.num)?,
            name: FunctionalityName::new(form.name)?,
            url,
            description: optional_text(&form.description),
        })
    }
}
