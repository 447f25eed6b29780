use serde::Deserialize;

use crate::domain::fields::{lenient_text, null_as_default};
use crate::domain::types::RoleId;

/// Functionality reference embedded in a role record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionalityRef {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub num: Option<String>,
}

impl FunctionalityRef {
    /// `name (num)`, or whichever part is present.
    pub fn label(&self) -> Option<String> {
        match (self.name.as_deref(), self.num.as_deref()) {
            (Some(name), Some(num)) => Some(format!("{name} ({num})")),
            (Some(name), None) => Some(name.to_string()),
            (None, Some(num)) => Some(num.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub functionalities: Vec<FunctionalityRef>,
}

impl Role {
    pub fn functionality_labels(&self) -> Option<String> {
        let labels: Vec<String> = self
            .functionalities
            .iter()
            .filter_map(FunctionalityRef::label)
            .collect();
        if labels.is_empty() {
            None
        } else {
            Some(labels.join(", "))
        }
    }
}
