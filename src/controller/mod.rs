//! Generic paginated, filtered list controller.
//!
//! One [`ListController`] drives one screen: it composes the query from the
//! current page and filters, fetches it, classifies the outcome and hands a
//! complete [`ListSnapshot`] to its [`ListView`]. Only the response to the
//! most recent action is ever drawn.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::api::{FetchError, FetchResult, ResourceReader, ResourceWriter};
use crate::domain::filter::FilterState;
use crate::domain::page::{PageEnvelope, PageMeta, PageShapeError};
use crate::domain::types::RecordId;
use crate::pagination::{self, PageControl, SIBLING_COUNT};
use crate::query::ListQuery;
use crate::screens::ScreenSpec;
use crate::table::TableRow;
use crate::view::{Alert, ListSnapshot, ListView, TableBody, Tone};

mod state;

pub use state::{FilterEvent, Key, ListState, LoadOutcome, Transition};

/// Login page used when none is configured.
pub const DEFAULT_LOGIN_URL: &str = "/login";

struct ControllerState {
    phase: ListState,
    current_page: usize,
    page_size: usize,
    filters: FilterState,
    generation: u64,
    in_flight: Option<CancellationToken>,
    pending_alerts: Vec<Alert>,
    snapshot: ListSnapshot,
}

pub struct ListController<B, V> {
    screen: &'static ScreenSpec,
    backend: B,
    view: V,
    sibling_count: usize,
    login_url: String,
    state: Mutex<ControllerState>,
}

impl<B, V> ListController<B, V>
where
    B: ResourceReader + ResourceWriter,
    V: ListView,
{
    pub fn new(screen: &'static ScreenSpec, backend: B, view: V) -> Self {
        let snapshot = ListSnapshot {
            screen: screen.key,
            title: screen.title,
            state: ListState::Idle,
            columns: screen.columns,
            body: TableBody::Loading,
            pagination: Vec::new(),
            alerts: Vec::new(),
            current_page: 0,
            page_size: screen.page_size,
            total_elements: 0,
            filters: FilterState::new(),
            editable: screen.mutations.is_some(),
            redirect: None,
        };

        Self {
            screen,
            backend,
            view,
            sibling_count: SIBLING_COUNT,
            login_url: DEFAULT_LOGIN_URL.to_string(),
            state: Mutex::new(ControllerState {
                phase: ListState::Idle,
                current_page: 0,
                page_size: screen.page_size,
                filters: FilterState::new(),
                generation: 0,
                in_flight: None,
                pending_alerts: Vec::new(),
                snapshot,
            }),
        }
    }

    pub fn with_sibling_count(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    pub fn screen(&self) -> &'static ScreenSpec {
        self.screen
    }

    pub fn state(&self) -> ListState {
        self.lock().phase
    }

    pub fn current_page(&self) -> usize {
        self.lock().current_page
    }

    pub fn filters(&self) -> FilterState {
        self.lock().filters.clone()
    }

    /// Last snapshot handed to the view.
    pub fn snapshot(&self) -> ListSnapshot {
        self.lock().snapshot.clone()
    }

    /// Queues an alert for the next render.
    pub fn notify(&self, alert: Alert) {
        self.lock().pending_alerts.push(alert);
    }

    /// Loads the first page without filters.
    pub async fn mount(&self) -> LoadOutcome {
        self.load(0, FilterState::new()).await
    }

    /// Loads a deep-linked page, e.g. from the console's own pagination links.
    pub async fn open(&self, page: usize, filters: FilterState) -> LoadOutcome {
        self.load(page, filters).await
    }

    /// Applies new filter values and goes back to the first page.
    pub async fn search(&self, filters: FilterState) -> LoadOutcome {
        self.load(0, filters).await
    }

    pub async fn reset(&self) -> LoadOutcome {
        self.load(0, FilterState::new()).await
    }

    /// Routes a search-panel interaction; keys other than Enter do nothing.
    pub async fn handle(&self, event: FilterEvent) -> Option<LoadOutcome> {
        match event {
            FilterEvent::Search(filters) => Some(self.search(filters).await),
            FilterEvent::Reset => Some(self.reset().await),
            FilterEvent::KeyPressed {
                key: Key::Enter,
                filters,
            } => Some(self.search(filters).await),
            FilterEvent::KeyPressed { .. } => None,
        }
    }

    /// Loads `page` keeping the active filters and page size.
    pub async fn go_to_page(&self, page: usize) -> LoadOutcome {
        let filters = self.filters();
        self.load(page, filters).await
    }

    /// Follows a pagination control; disabled controls and ellipses do nothing.
    pub async fn activate(&self, control: &PageControl) -> Option<LoadOutcome> {
        let target = control.target.filter(|_| !control.disabled)?;
        Some(self.go_to_page(target).await)
    }

    /// Reloads the current page with the active filters.
    pub async fn refresh(&self) -> LoadOutcome {
        let (page, filters) = {
            let state = self.lock();
            (state.current_page, state.filters.clone())
        };
        self.load(page, filters).await
    }

    pub async fn create(&self, body: &Value) -> LoadOutcome {
        let Some(resource) = self.mutable_resource() else {
            return self.reject_mutation();
        };
        let result = self.backend.create(resource, body).await;
        self.after_mutation(result, "created", Some(0)).await
    }

    pub async fn update(&self, id: RecordId, body: &Value) -> LoadOutcome {
        let Some(resource) = self.mutable_resource() else {
            return self.reject_mutation();
        };
        let result = self.backend.update(resource, id, body).await;
        self.after_mutation(result, "updated", None).await
    }

    /// Runs a record sub-action such as `assign-roles`; reloads the current page.
    pub async fn perform(&self, id: RecordId, action: &str, body: &Value) -> LoadOutcome {
        let Some(resource) = self.mutable_resource() else {
            return self.reject_mutation();
        };
        let result = self.backend.post_action(resource, id, action, body).await;
        self.after_mutation(result, "updated", None).await
    }

    pub async fn delete(&self, id: RecordId) -> LoadOutcome {
        let Some(resource) = self.mutable_resource() else {
            return self.reject_mutation();
        };
        let result = self.backend.delete(resource, id).await;
        self.after_mutation(result, "deleted", Some(0)).await
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn load(&self, page: usize, filters: FilterState) -> LoadOutcome {
        let (generation, token, path) = {
            let mut state = self.lock();
            let Some(next) = state.phase.apply(Transition::Start) else {
                return LoadOutcome::Redirected(self.login_url.clone());
            };

            if let Some(previous) = state.in_flight.take() {
                previous.cancel();
            }
            let token = CancellationToken::new();
            state.in_flight = Some(token.clone());
            state.generation += 1;
            state.phase = next;
            state.filters = filters;

            let built = ListQuery::new(self.screen)
                .paginate(page, state.page_size)
                .filters(&state.filters)
                .build();
            for warning in &built.warnings {
                log::warn!("{}: {warning}", self.screen.key);
            }

            self.publish(&mut state, TableBody::Loading, Vec::new(), false);
            (
                state.generation,
                token,
                format!("{}?{}", self.screen.resource, built.query),
            )
        };

        let result = tokio::select! {
            _ = token.cancelled() => {
                log::debug!("{}: request {generation} cancelled", self.screen.key);
                return LoadOutcome::Superseded;
            }
            result = self.backend.fetch_json(&path) => result,
        };

        let mut state = self.lock();
        if state.generation != generation {
            log::debug!(
                "{}: discarding response to request {generation}, request {} is current",
                self.screen.key,
                state.generation
            );
            return LoadOutcome::Superseded;
        }
        state.in_flight = None;

        let decoded = result.and_then(|body| self.decode(body));
        self.finish(&mut state, decoded)
    }

    fn decode(&self, body: Option<Value>) -> FetchResult<(PageMeta, Vec<TableRow>)> {
        let body = body.ok_or(PageShapeError::EmptyBody)?;
        let envelope = PageEnvelope::from_json(body)?;
        let rows = (self.screen.decode_rows)(envelope.content, &self.screen.row_format())?;
        Ok((envelope.meta, rows))
    }

    fn finish(
        &self,
        state: &mut ControllerState,
        decoded: FetchResult<(PageMeta, Vec<TableRow>)>,
    ) -> LoadOutcome {
        match decoded {
            Ok((meta, rows)) => {
                self.transition(state, Transition::Succeed);
                state.current_page = meta.number;
                state.snapshot.total_elements = meta.total_elements;
                let controls = pagination::controls(&meta, self.sibling_count);

                if rows.is_empty() {
                    let message = if meta.total_elements > 0 {
                        format!(
                            "This page is empty, but {} records match in total.",
                            meta.total_elements
                        )
                    } else {
                        self.screen.empty_message.to_string()
                    };
                    self.publish(
                        state,
                        TableBody::Placeholder {
                            message,
                            tone: Tone::Info,
                        },
                        controls,
                        true,
                    );
                    LoadOutcome::Empty
                } else {
                    let count = rows.len();
                    self.publish(state, TableBody::Rows { rows }, controls, true);
                    LoadOutcome::Loaded {
                        page: meta.number,
                        rows: count,
                    }
                }
            }
            Err(FetchError::Schema(reason)) => {
                log::warn!("{}: unexpected response shape: {reason}", self.screen.key);
                self.transition(state, Transition::Succeed);
                state.snapshot.total_elements = 0;
                self.publish(
                    state,
                    TableBody::Placeholder {
                        message: self.screen.empty_message.to_string(),
                        tone: Tone::Info,
                    },
                    Vec::new(),
                    true,
                );
                LoadOutcome::Empty
            }
            Err(FetchError::Auth { status }) => self.redirect(state, status),
            Err(err) => {
                log::error!("Failed to load {}: {err}", self.screen.key);
                self.transition(state, Transition::Fail);
                let message = format!(
                    "Failed to load {}: {err}",
                    self.screen.title.to_lowercase()
                );
                self.publish(
                    state,
                    TableBody::Placeholder {
                        message,
                        tone: Tone::Danger,
                    },
                    Vec::new(),
                    true,
                );
                LoadOutcome::Failed(err.to_string())
            }
        }
    }

    fn transition(&self, state: &mut ControllerState, transition: Transition) {
        match state.phase.apply(transition) {
            Some(next) => state.phase = next,
            None => log::debug!(
                "{}: ignoring {transition:?} in {:?}",
                self.screen.key,
                state.phase
            ),
        }
    }

    fn redirect(&self, state: &mut ControllerState, status: u16) -> LoadOutcome {
        log::warn!(
            "{}: backend answered HTTP {status}, redirecting to {}",
            self.screen.key,
            self.login_url
        );
        self.transition(state, Transition::Deny);
        if let Some(token) = state.in_flight.take() {
            token.cancel();
        }
        state.snapshot.state = state.phase;
        state.snapshot.redirect = Some(self.login_url.clone());
        self.view.render(&state.snapshot);
        LoadOutcome::Redirected(self.login_url.clone())
    }

    /// Replaces the snapshot and renders it.
    fn publish(
        &self,
        state: &mut ControllerState,
        body: TableBody,
        pagination: Vec<PageControl>,
        drain_alerts: bool,
    ) {
        let alerts = if drain_alerts {
            std::mem::take(&mut state.pending_alerts)
        } else {
            state.pending_alerts.clone()
        };

        state.snapshot = ListSnapshot {
            state: state.phase,
            body,
            pagination,
            alerts,
            current_page: state.current_page,
            page_size: state.page_size,
            filters: state.filters.clone(),
            redirect: None,
            ..state.snapshot.clone()
        };
        self.view.render(&state.snapshot);
    }

    fn mutable_resource(&self) -> Option<&'static str> {
        self.screen.mutations
    }

    fn reject_mutation(&self) -> LoadOutcome {
        let message = format!("{} records cannot be changed here.", self.screen.noun);
        log::warn!("{}: {message}", self.screen.key);
        self.fail_mutation(message)
    }

    fn fail_mutation(&self, message: String) -> LoadOutcome {
        let mut state = self.lock();
        if state.phase.is_terminal() {
            return LoadOutcome::Redirected(self.login_url.clone());
        }
        state.pending_alerts.push(Alert::danger(message.clone()));
        let body = state.snapshot.body.clone();
        let pagination = state.snapshot.pagination.clone();
        self.publish(&mut state, body, pagination, true);
        LoadOutcome::Failed(message)
    }

    async fn after_mutation(
        &self,
        result: FetchResult<Option<Value>>,
        done: &str,
        page: Option<usize>,
    ) -> LoadOutcome {
        match result {
            Ok(_) => {
                let (page, filters) = {
                    let mut state = self.lock();
                    state
                        .pending_alerts
                        .push(Alert::success(format!("{} {done}.", self.screen.noun)));
                    (page.unwrap_or(state.current_page), state.filters.clone())
                };
                self.load(page, filters).await
            }
            Err(FetchError::Auth { status }) => {
                let mut state = self.lock();
                if state.phase.is_terminal() {
                    return LoadOutcome::Redirected(self.login_url.clone());
                }
                self.redirect(&mut state, status)
            }
            Err(err) => {
                log::error!("Failed to save {} record: {err}", self.screen.key);
                self.fail_mutation(err.to_string())
            }
        }
    }
}
