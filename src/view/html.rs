//! Tera-backed view producing the list fragment served by the HTTP host.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tera::{Context, Tera};

use crate::query::link_query;
use crate::view::{ListSnapshot, ListView};

const LIST_TEMPLATE: &str = "lists/list.html";

/// Latest output of an [`HtmlView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedList {
    Html(String),
    Redirect(String),
    Failed(String),
}

/// Pagination control with the href of the console's own list route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub label: String,
    pub href: Option<String>,
    pub active: bool,
    pub disabled: bool,
}

pub struct HtmlView {
    tera: Arc<Tera>,
    output: Mutex<Option<RenderedList>>,
}

impl HtmlView {
    pub fn new(tera: Arc<Tera>) -> Self {
        Self {
            tera,
            output: Mutex::new(None),
        }
    }

    /// Takes the most recent render, leaving nothing behind.
    pub fn take(&self) -> Option<RenderedList> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn render_html(&self, snapshot: &ListSnapshot) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("list", snapshot);
        context.insert("links", &page_links(snapshot));
        self.tera.render(LIST_TEMPLATE, &context)
    }
}

impl ListView for HtmlView {
    fn render(&self, snapshot: &ListSnapshot) {
        let rendered = match &snapshot.redirect {
            Some(location) => RenderedList::Redirect(location.clone()),
            None => match self.render_html(snapshot) {
                Ok(html) => RenderedList::Html(html),
                Err(err) => {
                    log::error!("Failed to render {} list: {err}", snapshot.screen);
                    RenderedList::Failed(err.to_string())
                }
            },
        };

        *self.output.lock().unwrap_or_else(PoisonError::into_inner) = Some(rendered);
    }
}

/// Pagination controls as links to `/{screen}?page=N&<filters>`.
pub fn page_links(snapshot: &ListSnapshot) -> Vec<PageLink> {
    snapshot
        .pagination
        .iter()
        .map(|control| PageLink {
            label: control.label.clone(),
            href: control.target.map(|page| {
                format!("/{}?{}", snapshot.screen, link_query(page, &snapshot.filters))
            }),
            active: control.active,
            disabled: control.disabled,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ListState;
    use crate::domain::filter::FilterState;
    use crate::domain::page::PageMeta;
    use crate::pagination::controls;
    use crate::table::{Cell, TableRow};
    use crate::view::{Alert, TableBody, Tone};

    fn tera() -> Arc<Tera> {
        Arc::new(Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap())
    }

    fn snapshot(body: TableBody) -> ListSnapshot {
        ListSnapshot {
            screen: "users",
            title: "Users",
            state: ListState::Loaded,
            columns: &["ID", "Username"],
            body,
            pagination: controls(&PageMeta::new(3, 1, 25), 1),
            alerts: vec![Alert::success("User created.")],
            current_page: 1,
            page_size: 10,
            total_elements: 25,
            filters: FilterState::new().with("usernameSearch", "bob"),
            editable: false,
            redirect: None,
        }
    }

    #[test]
    fn links_carry_page_and_filters() {
        let links = page_links(&snapshot(TableBody::Loading));

        assert_eq!(
            links[0].href.as_deref(),
            Some("/users?page=0&usernameSearch=bob")
        );
        let active: Vec<_> = links.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "2");
    }

    #[test]
    fn renders_rows_alerts_and_pagination() {
        let view = HtmlView::new(tera());
        view.render(&snapshot(TableBody::Rows {
            rows: vec![TableRow {
                id: Some(1),
                cells: vec![Cell::text("1"), Cell::text("alice")],
            }],
        }));

        let Some(RenderedList::Html(html)) = view.take() else {
            panic!("expected html");
        };
        assert!(html.contains("alice"));
        assert!(html.contains("User created."));
        assert!(html.contains("pagination"));
        assert_eq!(view.take(), None);
    }

    #[test]
    fn renders_error_placeholder() {
        let view = HtmlView::new(tera());
        let mut error = snapshot(TableBody::Placeholder {
            message: "Failed to load users: network error".to_string(),
            tone: Tone::Danger,
        });
        error.pagination.clear();
        view.render(&error);

        let Some(RenderedList::Html(html)) = view.take() else {
            panic!("expected html");
        };
        assert!(html.contains("Failed to load users: network error"));
        assert!(html.contains("text-danger"));
        assert!(!html.contains("page-item"));
    }

    #[test]
    fn redirect_snapshots_are_not_drawn() {
        let view = HtmlView::new(tera());
        let mut gone = snapshot(TableBody::Loading);
        gone.redirect = Some("/login".to_string());
        view.render(&gone);

        assert_eq!(view.take(), Some(RenderedList::Redirect("/login".to_string())));
    }
}
