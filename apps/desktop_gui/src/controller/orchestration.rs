//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use shared::protocol::endpoint_path;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::{reduce, Effect, ViewEvent, ViewState};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err("UI command queue is full; please retry".to_string())
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err("backend worker unavailable".to_string())
        }
    }
}

/// Applies `event` and runs the resulting effect.
///
/// A fetch that cannot be queued is failed immediately so the view never
/// stays in the loading state without a request in flight.
pub fn apply_view_event(
    state: &mut ViewState,
    cmd_tx: &Sender<BackendCommand>,
    event: ViewEvent,
) {
    match reduce(state, event) {
        Effect::None => {}
        Effect::Fetch(ticket) => {
            if let Err(reason) =
                dispatch_backend_command(cmd_tx, BackendCommand::FetchCategory { ticket })
            {
                let message = format!(
                    "Failed to fetch {}: {reason}",
                    endpoint_path(ticket.category)
                );
                reduce(state, ViewEvent::FetchFailed { ticket, message });
            }
        }
    }
}
