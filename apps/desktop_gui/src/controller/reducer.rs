//! View-state reducer for the dashboard.
//!
//! [`reduce`] applies one [`ViewEvent`] to the [`ViewState`] and returns the
//! [`Effect`] the runtime should execute. It performs no I/O.

use shared::{domain::Category, protocol::Records};

/// Identifies one fetch cycle. Only the completion carrying the most
/// recently issued ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub category: Category,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    SessionStarted,
    CategorySelected(Category),
    FetchSucceeded { ticket: FetchTicket, records: Records },
    FetchFailed { ticket: FetchTicket, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(FetchTicket),
}

/// What occupies the data area below the tabs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewBody<'a> {
    Loading,
    Table(&'a Records),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    active_category: Category,
    loading: bool,
    error: Option<String>,
    records: Records,
    pending: Option<FetchTicket>,
    generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_category: Category::Products,
            loading: false,
            error: None,
            records: Records::empty(Category::Products),
            pending: None,
            generation: 0,
        }
    }
}

impl ViewState {
    pub fn active_category(&self) -> Category {
        self.active_category
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn pending(&self) -> Option<FetchTicket> {
        self.pending
    }

    /// The table is shown only once the active category's own fetch has
    /// completed successfully; a failed refresh hides it.
    pub fn body(&self) -> ViewBody<'_> {
        if self.loading {
            ViewBody::Loading
        } else if self.error.is_none() && self.records.category() == self.active_category {
            ViewBody::Table(&self.records)
        } else {
            ViewBody::Empty
        }
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket {
            category: self.active_category,
            generation: self.generation,
        };
        self.loading = true;
        self.error = None;
        self.pending = Some(ticket);
        ticket
    }

    fn accepts(&self, ticket: FetchTicket) -> bool {
        self.pending == Some(ticket)
    }
}

pub fn reduce(state: &mut ViewState, event: ViewEvent) -> Effect {
    match event {
        ViewEvent::SessionStarted => Effect::Fetch(state.begin_fetch()),

        ViewEvent::CategorySelected(category) => {
            state.active_category = category;
            Effect::Fetch(state.begin_fetch())
        }

        ViewEvent::FetchSucceeded { ticket, records } => {
            if !state.accepts(ticket) {
                tracing::debug!(
                    category = %ticket.category,
                    generation = ticket.generation,
                    "discarding superseded fetch result"
                );
                return Effect::None;
            }
            state.records = records;
            state.error = None;
            state.loading = false;
            state.pending = None;
            Effect::None
        }

        ViewEvent::FetchFailed { ticket, message } => {
            if !state.accepts(ticket) {
                tracing::debug!(
                    category = %ticket.category,
                    generation = ticket.generation,
                    "discarding superseded fetch failure"
                );
                return Effect::None;
            }
            state.error = Some(message);
            state.loading = false;
            state.pending = None;
            Effect::None
        }
    }
}
