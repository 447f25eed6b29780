//! Create and edit forms posted to the console, validated before reaching the backend.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod functionalities;
pub mod roles;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid value: {0}")]
    Constraint(#[from] TypeConstraintError),

    #[error("malformed form body: {0}")]
    Malformed(#[from] serde::de::value::Error),

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0} records cannot be changed here")]
    Unsupported(String),
}

/// Parses and validates the create form of `screen`, returning the JSON body
/// for the backend.
pub fn create_payload(screen: &str, body: &[u8]) -> Result<Value, FormError> {
    match screen {
        "users" => encode(users::NewUserPayload::try_from(
            serde_html_form::from_bytes::<users::AddUserForm>(body)?,
        )?),
        "roles" => encode(roles::NewRolePayload::try_from(
            serde_html_form::from_bytes::<roles::AddRoleForm>(body)?,
        )?),
        "functionalities" => encode(functionalities::NewFunctionalityPayload::try_from(
            serde_html_form::from_bytes::<functionalities::AddFunctionalityForm>(body)?,
        )?),
        other => Err(FormError::Unsupported(other.to_string())),
    }
}

/// Parses and validates the edit form of `screen`.
///
/// Roles and functionalities are edited with the same fields they are created with.
pub fn update_payload(screen: &str, body: &[u8]) -> Result<Value, FormError> {
    match screen {
        "users" => encode(users::UpdateUserPayload::try_from(
            serde_html_form::from_bytes::<users::EditUserForm>(body)?,
        )?),
        "roles" | "functionalities" => create_payload(screen, body),
        other => Err(FormError::Unsupported(other.to_string())),
    }
}

/// Parses the assign-roles form of the users screen.
pub fn assign_roles_payload(body: &[u8]) -> Result<Value, FormError> {
    encode(users::AssignRolesPayload::from(serde_html_form::from_bytes::<
        users::AssignRolesForm,
    >(body)?))
}

fn encode<T: Serialize>(payload: T) -> Result<Value, FormError> {
    Ok(serde_json::to_value(payload)?)
}
