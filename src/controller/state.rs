use serde::Serialize;

use crate::domain::filter::FilterState;

/// Lifecycle phase of a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListState {
    Idle,
    Loading,
    Loaded,
    Error,
    /// The session is gone; nothing is loaded any more.
    Redirected,
}

/// Events that move a list between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A load was requested.
    Start,
    /// A page arrived (possibly empty).
    Succeed,
    /// The load failed with a displayable error.
    Fail,
    /// The backend rejected the session.
    Deny,
}

impl ListState {
    /// Next phase, or `None` when `transition` is not allowed from `self`.
    pub fn apply(self, transition: Transition) -> Option<ListState> {
        use ListState::*;
        use Transition::*;

        match (self, transition) {
            (Redirected, _) => None,
            (_, Start) => Some(Loading),
            (_, Deny) => Some(Redirected),
            (Loading, Succeed) => Some(Loaded),
            (Loading, Fail) => Some(Error),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ListState::Redirected
    }
}

/// Result of one controller action, after its render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows were drawn for the backend's page `page`.
    Loaded { page: usize, rows: usize },
    /// The empty-state placeholder was drawn.
    Empty,
    /// An error row was drawn (or an alert, for mutations).
    Failed(String),
    /// The screen navigated away to this location.
    Redirected(String),
    /// A newer action took over before this one finished.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// Interactions with a screen's search panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Search(FilterState),
    Reset,
    /// Key pressed inside a text input, with the panel's current values.
    KeyPressed { key: Key, filters: FilterState },
}
