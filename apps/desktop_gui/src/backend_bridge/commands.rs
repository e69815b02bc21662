//! Backend commands queued from UI to backend worker.

use crate::controller::reducer::FetchTicket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    FetchCategory { ticket: FetchTicket },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchCategory { .. } => "fetch_category",
        }
    }
}
