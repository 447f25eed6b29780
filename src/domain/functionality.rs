use serde::Deserialize;

use crate::domain::fields::lenient_text;
use crate::domain::types::FunctionalityId;

/// Permission unit that roles are composed of.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Functionality {
    pub id: FunctionalityId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub num: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}
