//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::CatalogSource;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the backend worker thread.
///
/// Every fetch runs as its own task; none is cancelled when the user moves
/// on, the reducer drops results that arrive for superseded tickets. The
/// thread exits once every command sender is dropped.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn CatalogSource>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::FetchCategory { ticket } => {
                    let source = Arc::clone(&source);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let result = source.fetch(ticket.category).await;
                        deliver(&ui_tx, UiEvent::FetchCompleted { ticket, result }).await;
                    });
                }
            }
        }

        tracing::debug!("backend command queue closed; worker stopping");
        runtime.shutdown_background();
    })
}

/// Hands an event to the UI without parking a runtime worker.
///
/// A completion must never be dropped or the tab stays in its loading state,
/// so a full queue defers to the blocking pool until the UI drains it.
async fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::warn!("ui event queue full; waiting for the UI to drain it");
            let ui_tx = ui_tx.clone();
            let sent = tokio::task::spawn_blocking(move || ui_tx.send(event).is_ok()).await;
            if !matches!(sent, Ok(true)) {
                tracing::debug!("ui event queue closed before fetch completed");
            }
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue closed before fetch completed");
        }
    }
}
