//! Request handling behind the HTTP routes.

use thiserror::Error;

use crate::api::FetchError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;

pub mod export;
pub mod lists;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no such screen: {0}")]
    NotFound(String),

    /// The backend rejected the session.
    #[error("redirect to {0}")]
    Redirect(String),

    #[error("invalid identifier: {0}")]
    Constraint(#[from] TypeConstraintError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("backend error: {0}")]
    Backend(#[from] FetchError),

    #[error("failed to render list: {0}")]
    Render(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
