//! Local stand-in for the contract-management REST API.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::json;

use super::{page, users};

pub const AUDIT_CSV: &str = "id,username,action\n1,alice,LOGIN\n";

type Received = Mutex<Vec<String>>;

pub struct FakeApi {
    pub base_url: String,
    received: web::Data<Received>,
}

impl FakeApi {
    /// Requests seen so far, as `METHOD /path?query` plus the body if any.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

fn record(received: &Received, req: &HttpRequest, body: &[u8]) {
    let mut line = format!("{} {}", req.method(), req.uri());
    if !body.is_empty() {
        line.push(' ');
        line.push_str(&String::from_utf8_lossy(body));
    }
    received.lock().unwrap().push(line);
}

async fn list_users(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    received: web::Data<Received>,
) -> HttpResponse {
    record(&received, &req, b"");
    let number = query
        .get("page")
        .and_then(|page| page.parse().ok())
        .unwrap_or(0);
    HttpResponse::Ok().json(page(users(&[1, 2, 3]), 2, number, 13))
}

async fn create_user(
    req: HttpRequest,
    body: web::Bytes,
    received: web::Data<Received>,
) -> HttpResponse {
    record(&received, &req, &body);
    if String::from_utf8_lossy(&body).contains("\"taken\"") {
        return HttpResponse::BadRequest().json(json!({"message": "Username already exists"}));
    }
    HttpResponse::Created().json(json!({"id": 99}))
}

async fn update_user(
    req: HttpRequest,
    body: web::Json<serde_json::Value>,
    received: web::Data<Received>,
) -> HttpResponse {
    record(&received, &req, body.0.to_string().as_bytes());
    HttpResponse::Ok().json(body.into_inner())
}

async fn assign_roles(
    req: HttpRequest,
    body: web::Bytes,
    received: web::Data<Received>,
) -> HttpResponse {
    record(&received, &req, &body);
    HttpResponse::Ok().json(json!({"id": 7}))
}

async fn delete_user(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    record(&received, &req, b"");
    HttpResponse::NoContent().finish()
}

async fn unauthorized(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    record(&received, &req, b"");
    HttpResponse::Unauthorized().finish()
}

async fn forbidden(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    record(&received, &req, b"");
    HttpResponse::Forbidden().json(json!({"error": "Forbidden"}))
}

async fn server_error(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    record(&received, &req, b"");
    HttpResponse::InternalServerError().json(json!({"message": "Database unavailable"}))
}

async fn empty_body(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    record(&received, &req, b"");
    HttpResponse::Ok().finish()
}

async fn broken_json(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    record(&received, &req, b"");
    HttpResponse::Ok()
        .content_type("application/json")
        .body("{\"content\": [")
}

async fn audit_export(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    record(&received, &req, b"");
    HttpResponse::Ok()
        .content_type("text/csv")
        .body(AUDIT_CSV)
}

async fn slow(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    record(&received, &req, b"");
    actix_web::rt::time::sleep(Duration::from_secs(2)).await;
    HttpResponse::Ok().json(json!({}))
}

/// Binds the fake API on a free local port.
pub async fn start() -> FakeApi {
    let received = web::Data::new(Received::default());
    let data = received.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/api/system/users", web::get().to(list_users))
            .route("/api/system/users", web::post().to(create_user))
            .route("/api/system/users/{id}", web::put().to(update_user))
            .route("/api/system/users/{id}", web::delete().to(delete_user))
            .route(
                "/api/system/users/{id}/assign-roles",
                web::post().to(assign_roles),
            )
            .route("/api/system/roles", web::get().to(unauthorized))
            .route("/api/system/audit-logs", web::get().to(forbidden))
            .route("/api/system/audit-logs/export", web::get().to(audit_export))
            .route("/api/system/functionalities", web::get().to(server_error))
            .route("/reports/api/contracts/search", web::get().to(empty_body))
            .route("/customers/api/search", web::get().to(broken_json))
            .route("/slow", web::get().to(slow))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let address = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    FakeApi {
        base_url: format!("http://{address}"),
        received,
    }
}
