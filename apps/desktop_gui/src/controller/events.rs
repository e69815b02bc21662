//! Backend-to-UI events for the desktop dashboard.

use shared::{error::FetchFailure, protocol::Records};

use crate::controller::reducer::{FetchTicket, ViewEvent};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    WorkerFailed(String),
    FetchCompleted {
        ticket: FetchTicket,
        result: Result<Records, FetchFailure>,
    },
}

impl UiEvent {
    /// Converts a completed fetch into the reducer event; lifecycle events
    /// have no view-state counterpart.
    pub fn into_view_event(self) -> Option<ViewEvent> {
        match self {
            UiEvent::FetchCompleted { ticket, result } => Some(match result {
                Ok(records) => ViewEvent::FetchSucceeded { ticket, records },
                Err(failure) => ViewEvent::FetchFailed {
                    ticket,
                    message: failure.to_string(),
                },
            }),
            UiEvent::Info(_) | UiEvent::WorkerFailed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::{domain::Category, error::FetchError};

    use super::*;

    #[test]
    fn failed_completion_carries_user_facing_message() {
        let ticket = FetchTicket {
            category: Category::Users,
            generation: 4,
        };
        let event = UiEvent::FetchCompleted {
            ticket,
            result: Err(FetchFailure::new(
                "be-ecom-users/api/users",
                FetchError::Status(500),
            )),
        };
        assert_eq!(
            event.into_view_event(),
            Some(ViewEvent::FetchFailed {
                ticket,
                message: "Failed to fetch be-ecom-users/api/users: HTTP 500".into(),
            })
        );
    }

    #[test]
    fn lifecycle_events_do_not_touch_view_state() {
        assert_eq!(UiEvent::Info("ready".into()).into_view_event(), None);
    }
}
