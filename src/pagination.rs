use serde::Serialize;

use crate::domain::page::PageMeta;

/// Pages shown on each side of the current page.
pub const SIBLING_COUNT: usize = 1;

/// Zero-based page indices to render, `None` marking an ellipsis.
///
/// Small result sets list every page. Larger ones always show the first and
/// last page plus a window of `2 * sibling_count + 1` pages around
/// `current_page`; the window is clamped so its size stays the same at the
/// edges.
pub fn page_window(
    total_pages: usize,
    current_page: usize,
    sibling_count: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }
    if total_pages <= 2 * sibling_count + 5 {
        return (0..total_pages).map(Some).collect();
    }

    let last_page = total_pages - 1;
    let current_page = current_page.min(last_page);
    let width = 2 * sibling_count + 1;
    // Window must fit between the first and the last page.
    let start = current_page
        .saturating_sub(sibling_count)
        .clamp(1, last_page - width);
    let end = start + width - 1;

    let indices = std::iter::once(0)
        .chain(start..=end)
        .chain(std::iter::once(last_page));

    let mut pages = Vec::with_capacity(width + 4);
    let mut previous: Option<usize> = None;
    for index in indices {
        if previous.is_some_and(|p| index > p + 1) {
            pages.push(None);
        }
        pages.push(Some(index));
        previous = Some(index);
    }
    pages
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    First,
    Previous,
    Page,
    Ellipsis,
    Next,
    Last,
}

/// One pagination control.
///
/// `target` is the zero-based page the control navigates to; disabled
/// controls and ellipses have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControl {
    pub kind: ControlKind,
    pub label: String,
    pub target: Option<usize>,
    pub active: bool,
    pub disabled: bool,
}

impl PageControl {
    fn nav(kind: ControlKind, label: &str, target: usize, disabled: bool) -> Self {
        Self {
            kind,
            label: label.to_string(),
            target: (!disabled).then_some(target),
            active: false,
            disabled,
        }
    }

    fn page(index: usize, current: usize) -> Self {
        Self {
            kind: ControlKind::Page,
            label: (index + 1).to_string(),
            target: Some(index),
            active: index == current,
            disabled: false,
        }
    }

    fn ellipsis() -> Self {
        Self {
            kind: ControlKind::Ellipsis,
            label: "...".to_string(),
            target: None,
            active: false,
            disabled: true,
        }
    }
}

/// Builds the full control strip for a page; empty when there is one page or none.
pub fn controls(meta: &PageMeta, sibling_count: usize) -> Vec<PageControl> {
    if meta.total_pages <= 1 {
        return Vec::new();
    }

    let current = meta.number;
    let last_page = meta.total_pages - 1;

    let mut controls = vec![
        PageControl::nav(ControlKind::First, "First", 0, meta.first),
        PageControl::nav(
            ControlKind::Previous,
            "Previous",
            current.saturating_sub(1),
            meta.first,
        ),
    ];

    controls.extend(
        page_window(meta.total_pages, current, sibling_count)
            .into_iter()
            .map(|entry| match entry {
                Some(index) => PageControl::page(index, current),
                None => PageControl::ellipsis(),
            }),
    );

    controls.push(PageControl::nav(
        ControlKind::Next,
        "Next",
        (current + 1).min(last_page),
        meta.last,
    ));
    controls.push(PageControl::nav(
        ControlKind::Last,
        "Last",
        last_page,
        meta.last,
    ));

    controls
}
