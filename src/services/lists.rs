//! List fragments: one short-lived controller per request.

use std::sync::Arc;

use serde_json::Value;
use tera::Tera;

use crate::api::{ResourceReader, ResourceWriter};
use crate::controller::{ListController, LoadOutcome};
use crate::domain::filter::FilterState;
use crate::domain::types::RecordId;
use crate::forms::{self, FormError};
use crate::models::config::ServerConfig;
use crate::screens::{ScreenSpec, USERS};
use crate::services::{ServiceError, ServiceResult};
use crate::view::html::{HtmlView, RenderedList};
use crate::view::{Alert, ListView};

/// User sub-action replacing the user's roles.
const ASSIGN_ROLES: &str = "assign-roles";

/// Controller settings taken from the server configuration.
#[derive(Debug, Clone)]
pub struct ListSettings {
    pub login_url: String,
    pub sibling_count: usize,
}

impl From<&ServerConfig> for ListSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            login_url: config.login_url.clone(),
            sibling_count: config.sibling_count,
        }
    }
}

/// Page and filter values read from a list url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub page: usize,
    pub filters: FilterState,
}

impl ListRequest {
    /// Reads `page` and the screen's declared filters; everything else is dropped.
    pub fn from_query(screen: &ScreenSpec, query: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_html_form::from_str(query).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed query string for {}: {err}", screen.key);
            Vec::new()
        });

        let mut request = Self::default();
        for (key, value) in pairs {
            if key == "page" {
                request.page = value.trim().parse().unwrap_or(0);
            } else if screen.accepts_filter(&key) {
                request.filters.set(key, value);
            }
        }
        request
    }
}

fn list_controller<B>(
    screen: &'static ScreenSpec,
    backend: B,
    tera: Arc<Tera>,
    settings: &ListSettings,
) -> (ListController<B, Arc<HtmlView>>, Arc<HtmlView>)
where
    B: ResourceReader + ResourceWriter,
{
    let view = Arc::new(HtmlView::new(tera));
    let controller = ListController::new(screen, backend, view.clone())
        .with_sibling_count(settings.sibling_count)
        .with_login_url(settings.login_url.clone());
    (controller, view)
}

/// Unsupported screens fail the request; any other form error becomes an
/// alert above the table and nothing is sent.
fn form_payload<B, V>(
    controller: &ListController<B, V>,
    screen: &ScreenSpec,
    parsed: Result<Value, FormError>,
) -> ServiceResult<Option<Value>>
where
    B: ResourceReader + ResourceWriter,
    V: ListView,
{
    match parsed {
        Ok(payload) => Ok(Some(payload)),
        Err(err @ FormError::Unsupported(_)) => Err(err.into()),
        Err(err) => {
            log::warn!("Rejected {} form: {err}", screen.key);
            controller.notify(Alert::warning(err.to_string()));
            Ok(None)
        }
    }
}

fn rendered(view: &HtmlView) -> ServiceResult<String> {
    match view.take() {
        Some(RenderedList::Html(html)) => Ok(html),
        Some(RenderedList::Redirect(location)) => Err(ServiceError::Redirect(location)),
        Some(RenderedList::Failed(message)) => Err(ServiceError::Render(message)),
        None => Err(ServiceError::Render("nothing was rendered".to_string())),
    }
}

/// Renders the requested page of `screen`.
pub async fn show_list<B>(
    screen: &'static ScreenSpec,
    backend: B,
    tera: Arc<Tera>,
    settings: &ListSettings,
    request: ListRequest,
) -> ServiceResult<String>
where
    B: ResourceReader + ResourceWriter,
{
    let (controller, view) = list_controller(screen, backend, tera, settings);
    controller.open(request.page, request.filters).await;
    rendered(&view)
}

/// Validates a create form and forwards it to the backend.
///
/// The requested page is drawn first so that a rejected form or a failed
/// save is shown above the table the user was looking at.
pub async fn create_record<B>(
    screen: &'static ScreenSpec,
    backend: B,
    tera: Arc<Tera>,
    settings: &ListSettings,
    request: ListRequest,
    body: &[u8],
) -> ServiceResult<String>
where
    B: ResourceReader + ResourceWriter,
{
    let (controller, view) = list_controller(screen, backend, tera, settings);

    let payload = form_payload(&controller, screen, forms::create_payload(screen.key, body))?;

    let opened = controller.open(request.page, request.filters).await;
    if let Some(payload) = payload.filter(|_| !matches!(opened, LoadOutcome::Redirected(_))) {
        controller.create(&payload).await;
    }
    rendered(&view)
}

/// Validates an edit form and saves it; the requested page is reloaded.
pub async fn update_record<B>(
    screen: &'static ScreenSpec,
    backend: B,
    tera: Arc<Tera>,
    settings: &ListSettings,
    request: ListRequest,
    id: &str,
    body: &[u8],
) -> ServiceResult<String>
where
    B: ResourceReader + ResourceWriter,
{
    let id: RecordId = id.parse()?;
    let (controller, view) = list_controller(screen, backend, tera, settings);
    let payload = form_payload(&controller, screen, forms::update_payload(screen.key, body))?;

    let opened = controller.open(request.page, request.filters).await;
    if let Some(payload) = payload.filter(|_| !matches!(opened, LoadOutcome::Redirected(_))) {
        controller.update(id, &payload).await;
    }
    rendered(&view)
}

/// Replaces the roles of one user.
pub async fn assign_roles<B>(
    backend: B,
    tera: Arc<Tera>,
    settings: &ListSettings,
    request: ListRequest,
    id: &str,
    body: &[u8],
) -> ServiceResult<String>
where
    B: ResourceReader + ResourceWriter,
{
    let screen = &USERS;
    let id: RecordId = id.parse()?;
    let (controller, view) = list_controller(screen, backend, tera, settings);
    let payload = form_payload(&controller, screen, forms::assign_roles_payload(body))?;

    let opened = controller.open(request.page, request.filters).await;
    if let Some(payload) = payload.filter(|_| !matches!(opened, LoadOutcome::Redirected(_))) {
        controller.perform(id, ASSIGN_ROLES, &payload).await;
    }
    rendered(&view)
}

/// Deletes one record and renders the first page of what is left.
pub async fn delete_record<B>(
    screen: &'static ScreenSpec,
    backend: B,
    tera: Arc<Tera>,
    settings: &ListSettings,
    request: ListRequest,
    id: &str,
) -> ServiceResult<String>
where
    B: ResourceReader + ResourceWriter,
{
    let id: RecordId = id.parse()?;
    let (controller, view) = list_controller(screen, backend, tera, settings);

    let opened = controller.open(request.page, request.filters).await;
    if !matches!(opened, LoadOutcome::Redirected(_)) {
        controller.delete(id).await;
    }
    rendered(&view)
}
