use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use tera::Tera;

use crate::api::HttpBackend;
use crate::models::config::ServerConfig;
use crate::routes::{error_response, screen_or_404};
use crate::screens::USERS;
use crate::services::lists::{self as lists_service, ListRequest, ListSettings};

fn fragment(html: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[get("/")]
pub async fn index() -> impl Responder {
    super::redirect("/contracts")
}

#[get("/{screen}")]
pub async fn show_list(
    path: web::Path<String>,
    request: HttpRequest,
    backend: web::Data<HttpBackend>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let screen = match screen_or_404(&path) {
        Ok(screen) => screen,
        Err(response) => return response,
    };
    let list_request = ListRequest::from_query(screen, request.query_string());
    let settings = ListSettings::from(server_config.get_ref());

    match lists_service::show_list(
        screen,
        backend.get_ref().clone(),
        tera.into_inner(),
        &settings,
        list_request,
    )
    .await
    {
        Ok(html) => fragment(html),
        Err(err) => error_response(err, &server_config.login_url),
    }
}

#[post("/{screen}/add")]
pub async fn add_record(
    path: web::Path<String>,
    request: HttpRequest,
    backend: web::Data<HttpBackend>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
    form: web::Bytes,
) -> impl Responder {
    let screen = match screen_or_404(&path) {
        Ok(screen) => screen,
        Err(response) => return response,
    };
    let list_request = ListRequest::from_query(screen, request.query_string());
    let settings = ListSettings::from(server_config.get_ref());

    match lists_service::create_record(
        screen,
        backend.get_ref().clone(),
        tera.into_inner(),
        &settings,
        list_request,
        form.as_ref(),
    )
    .await
    {
        Ok(html) => fragment(html),
        Err(err) => error_response(err, &server_config.login_url),
    }
}

#[post("/{screen}/{id}/delete")]
pub async fn delete_record(
    path: web::Path<(String, String)>,
    request: HttpRequest,
    backend: web::Data<HttpBackend>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let (screen, id) = path.into_inner();
    let screen = match screen_or_404(&screen) {
        Ok(screen) => screen,
        Err(response) => return response,
    };
    let list_request = ListRequest::from_query(screen, request.query_string());
    let settings = ListSettings::from(server_config.get_ref());

    match lists_service::delete_record(
        screen,
        backend.get_ref().clone(),
        tera.into_inner(),
        &settings,
        list_request,
        &id,
    )
    .await
    {
        Ok(html) => fragment(html),
        Err(err) => error_response(err, &server_config.login_url),
    }
}

#[post("/{screen}/{id}/edit")]
pub async fn edit_record(
    path: web::Path<(String, String)>,
    request: HttpRequest,
    backend: web::Data<HttpBackend>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
    form: web::Bytes,
) -> impl Responder {
    let (screen, id) = path.into_inner();
    let screen = match screen_or_404(&screen) {
        Ok(screen) => screen,
        Err(response) => return response,
    };
    let list_request = ListRequest::from_query(screen, request.query_string());
    let settings = ListSettings::from(server_config.get_ref());

    match lists_service::update_record(
        screen,
        backend.get_ref().clone(),
        tera.into_inner(),
        &settings,
        list_request,
        &id,
        form.as_ref(),
    )
    .await
    {
        Ok(html) => fragment(html),
        Err(err) => error_response(err, &server_config.login_url),
    }
}

#[post("/users/{id}/assign-roles")]
pub async fn assign_roles(
    path: web::Path<String>,
    request: HttpRequest,
    backend: web::Data<HttpBackend>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
    form: web::Bytes,
) -> impl Responder {
    let list_request = ListRequest::from_query(&USERS, request.query_string());
    let settings = ListSettings::from(server_config.get_ref());

    match lists_service::assign_roles(
        backend.get_ref().clone(),
        tera.into_inner(),
        &settings,
        list_request,
        &path,
        form.as_ref(),
    )
    .await
    {
        Ok(html) => fragment(html),
        Err(err) => error_response(err, &server_config.login_url),
    }
}
