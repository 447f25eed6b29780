//! Actix-web handlers serving the rendered list fragments.

use actix_web::HttpResponse;
use actix_web::http::header;

use crate::api::FetchError;
use crate::screens::{self, ScreenSpec};
use crate::services::ServiceError;

pub mod export;
pub mod lists;

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn screen_or_404(key: &str) -> Result<&'static ScreenSpec, HttpResponse> {
    screens::find(key).ok_or_else(|| {
        log::debug!("Unknown screen requested: {key}");
        HttpResponse::NotFound().finish()
    })
}

/// Maps a service failure to the response the browser should get.
pub(crate) fn error_response(err: ServiceError, login_url: &str) -> HttpResponse {
    match err {
        ServiceError::Redirect(location) => redirect(&location),
        ServiceError::Backend(FetchError::Auth { .. }) => redirect(login_url),
        ServiceError::NotFound(_) | ServiceError::Form(_) => HttpResponse::NotFound().finish(),
        ServiceError::Constraint(err) => HttpResponse::BadRequest().body(err.to_string()),
        err => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
