#![cfg(feature = "server")]

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use contract_console::api::HttpBackend;
use contract_console::configure;
use contract_console::models::config::ServerConfig;
use tera::Tera;

mod common;

use common::server::{self, AUDIT_CSV, FakeApi};

const FORM: (&str, &str) = ("content-type", "application/x-www-form-urlencoded");

fn console(
    api: &FakeApi,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap();
    let backend = HttpBackend::builder(api.base_url.clone()).build().unwrap();
    let config = ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        api_base_url: api.base_url.clone(),
        login_url: "/login".to_string(),
        templates_dir: "templates/**/*".to_string(),
        request_timeout_secs: 10,
        sibling_count: 1,
    };

    App::new()
        .app_data(web::Data::new(tera))
        .app_data(web::Data::new(backend))
        .app_data(web::Data::new(config))
        .configure(configure)
}

async fn body_text(response: ServiceResponse<impl MessageBody>) -> String {
    String::from_utf8(test::read_body(response).await.to_vec()).unwrap()
}

#[actix_web::test]
async fn list_fragment_carries_rows_and_pagination() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::get()
        .uri("/users?usernameSearch=user&unrelated=1")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("users-list"));
    assert!(html.contains("user1@example.com"));
    assert!(html.contains("page-item"));
    assert_eq!(
        api.received(),
        vec!["GET /api/system/users?page=0&size=10&sort=username,asc&usernameSearch=user"]
    );
}

#[actix_web::test]
async fn deep_links_open_the_requested_page() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::get().uri("/users?page=1").to_request();
    let html = body_text(test::call_service(&app, request).await).await;

    assert!(html.contains(r#"data-page="1""#));
    assert!(api.received()[0].starts_with("GET /api/system/users?page=1&"));
}

#[actix_web::test]
async fn unknown_screens_are_not_found() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::get().uri("/invoices").to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(api.received().is_empty());
}

#[actix_web::test]
async fn rejected_sessions_redirect_to_login() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::get().uri("/roles").to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login"
    );
}

#[actix_web::test]
async fn backend_errors_render_an_error_row() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::get().uri("/functionalities").to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Failed to load functionalities: Database unavailable"));
    assert!(html.contains("text-danger"));
    assert!(!html.contains("page-item"));
}

#[actix_web::test]
async fn unexpected_bodies_render_the_empty_state() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::get().uri("/contracts").to_request();
    let html = body_text(test::call_service(&app, request).await).await;

    assert!(html.contains("No matching contracts found."));
    assert!(html.contains(r#"data-state="loaded""#));
}

#[actix_web::test]
async fn valid_create_form_is_forwarded_as_json() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/users/add")
        .insert_header(FORM)
        .set_payload(
            "username=carol&password=secret1&confirm_password=secret1\
             &email=carol%40example.com&enabled=on&role_names=ADMIN",
        )
        .to_request();
    let html = body_text(test::call_service(&app, request).await).await;

    assert!(html.contains("User created."));
    assert!(html.contains("alert-success"));

    let received = api.received();
    assert_eq!(received.len(), 3);
    assert!(received[1].starts_with("POST /api/system/users {"));
    assert!(received[1].contains(r#""username":"carol""#));
    assert!(received[1].contains(r#""roleNames":["ADMIN"]"#));
    assert!(received[2].starts_with("GET /api/system/users?page=0&"));
}

#[actix_web::test]
async fn invalid_create_form_shows_a_warning() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/users/add")
        .insert_header(FORM)
        .set_payload("username=carol&password=secret1&confirm_password=other11")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("alert-warning"));
    assert!(html.contains("user1@example.com"));
    assert!(api.received().iter().all(|line| !line.starts_with("POST")));
}

#[actix_web::test]
async fn rejected_create_keeps_the_table() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/users/add")
        .insert_header(FORM)
        .set_payload("username=taken&password=secret1&confirm_password=secret1")
        .to_request();
    let html = body_text(test::call_service(&app, request).await).await;

    assert!(html.contains("Username already exists"));
    assert!(html.contains("alert-danger"));
    assert!(html.contains("user1@example.com"));
    assert_eq!(api.received().len(), 2);
}

#[actix_web::test]
async fn read_only_screens_have_no_create_route() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/customers/add")
        .insert_header(FORM)
        .set_payload("customerName=Acme")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(api.received().is_empty());
}

#[actix_web::test]
async fn delete_removes_the_record_and_reloads() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post().uri("/users/5/delete").to_request();
    let html = body_text(test::call_service(&app, request).await).await;

    assert!(html.contains("User deleted."));
    assert!(
        api.received()
            .contains(&"DELETE /api/system/users/5".to_string())
    );
}

#[actix_web::test]
async fn delete_rejects_bad_identifiers() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    for uri in ["/users/abc/delete", "/users/0/delete"] {
        let request = test::TestRequest::post().uri(uri).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
    assert!(api.received().is_empty());
}

#[actix_web::test]
async fn edit_saves_the_record_and_reloads_the_current_page() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/users/5/edit?page=1")
        .insert_header(FORM)
        .set_payload("email=eve%40example.com&real_name=Eve&enabled=on")
        .to_request();
    let html = body_text(test::call_service(&app, request).await).await;

    assert!(html.contains("User updated."));
    assert!(html.contains(r#"data-page="1""#));

    let received = api.received();
    assert_eq!(received.len(), 3);
    assert!(received[1].starts_with("PUT /api/system/users/5 {"));
    assert!(received[1].contains(r#""realName":"Eve""#));
    assert!(received[1].contains(r#""enabled":true"#));
    assert!(!received[1].contains("username"));
    assert!(received[2].starts_with("GET /api/system/users?page=1&"));
}

#[actix_web::test]
async fn invalid_edit_form_is_not_sent() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/users/5/edit")
        .insert_header(FORM)
        .set_payload("email=not-an-email")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("alert-warning"));
    assert!(api.received().iter().all(|line| !line.starts_with("PUT")));
}

#[actix_web::test]
async fn read_only_screens_have_no_edit_route() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/contracts/3/edit")
        .insert_header(FORM)
        .set_payload("status=ACTIVE")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(api.received().is_empty());
}

#[actix_web::test]
async fn assigned_roles_are_posted_to_the_user() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/users/7/assign-roles")
        .insert_header(FORM)
        .set_payload("role_names=AUDITOR&role_names=CLERK")
        .to_request();
    let html = body_text(test::call_service(&app, request).await).await;

    assert!(html.contains("User updated."));
    assert!(api.received().contains(
        &r#"POST /api/system/users/7/assign-roles {"roleNames":["AUDITOR","CLERK"]}"#.to_string()
    ));
}

#[actix_web::test]
async fn assign_roles_rejects_bad_identifiers() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::post()
        .uri("/users/-1/assign-roles")
        .insert_header(FORM)
        .set_payload("role_names=AUDITOR")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(api.received().is_empty());
}

#[actix_web::test]
async fn audit_log_export_is_an_attachment() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let request = test::TestRequest::get()
        .uri("/audit-logs/export?username=alice&startDate=2024-01-01&page=3")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("audit-logs-export-"));
    assert!(disposition.contains(".csv"));

    assert_eq!(body_text(response).await, AUDIT_CSV);
    assert_eq!(
        api.received(),
        vec!["GET /api/system/audit-logs/export?username=alice"]
    );
}

#[actix_web::test]
async fn index_redirects_to_contracts() {
    let api = server::start().await;
    let app = test::init_service(console(&api)).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/contracts"
    );
}
