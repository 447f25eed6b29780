//! Administrative console for the contract-management backend.
//!
//! Every management screen is a paginated, filtered table driven by one
//! generic [`controller::ListController`]. The optional `server` feature
//! serves the rendered tables over HTTP.

pub mod api;
pub mod controller;
pub mod domain;
pub mod forms;
pub mod live;
pub mod models;
pub mod pagination;
pub mod query;
pub mod screens;
pub mod table;
pub mod view;

#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{configure, run};

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_web::{App, HttpServer, middleware, web};
    use tera::Tera;

    use crate::api::HttpBackend;
    use crate::models::config::ServerConfig;
    use crate::routes::export::export_audit_logs;
    use crate::routes::lists::{
        add_record, assign_roles, delete_record, edit_record, index, show_list,
    };

    /// Registers the console's routes.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(index)
            .service(export_audit_logs)
            .service(show_list)
            .service(add_record)
            .service(assign_roles)
            .service(edit_record)
            .service(delete_record);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let timeout = (server_config.request_timeout_secs > 0)
            .then(|| Duration::from_secs(server_config.request_timeout_secs));

        let backend = HttpBackend::builder(server_config.api_base_url.clone())
            .timeout(timeout)
            .build()
            .map_err(|e| std::io::Error::other(format!("Invalid backend settings: {e}")))?;

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving the console on {}:{} for backend {}",
            bind_address.0,
            bind_address.1,
            backend.base_url()
        );

        HttpServer::new(move || {
            App::new()
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .configure(configure)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(backend.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
