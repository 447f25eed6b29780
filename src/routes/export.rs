use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::api::HttpBackend;
use crate::models::config::ServerConfig;
use crate::routes::error_response;
use crate::screens::AUDIT_LOGS;
use crate::services::export::export_csv;
use crate::services::lists::ListRequest;

#[get("/audit-logs/export")]
pub async fn export_audit_logs(
    request: HttpRequest,
    backend: web::Data<HttpBackend>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let filters = ListRequest::from_query(&AUDIT_LOGS, request.query_string()).filters;

    match export_csv(&AUDIT_LOGS, backend.get_ref(), &filters).await {
        Ok(export) => HttpResponse::Ok()
            .content_type(export.content_type)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(export.filename)],
            })
            .body(export.bytes),
        Err(err) => error_response(err, &server_config.login_url),
    }
}
