use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use finder_logging::{finder_debug, finder_warn};

use crate::fetch::Catalog;
use crate::{EngineCommand, EngineEvent};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("api credential is not a valid header value")]
    InvalidCredential,
}

/// Runs catalog requests on a background tokio runtime.
///
/// Every command is spawned as its own task, so requests overlap freely and
/// complete in whatever order the network returns them. Nothing is cancelled.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(catalog: Arc<dyn Catalog>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("finder-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let catalog = catalog.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(catalog.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn enqueue(&self, command: EngineCommand) {
        let request_id = command.request_id();
        if self.cmd_tx.send(command).is_err() {
            finder_warn!("Engine stopped; dropping request {}", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    catalog: &dyn Catalog,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let request_id = command.request_id();
    let result = match command {
        EngineCommand::Discover { page, .. } => catalog.discover(page).await,
        EngineCommand::Search { term, .. } => catalog.search(&term).await,
    };
    match &result {
        Ok(movies) => finder_debug!("Request {} returned {} movies", request_id, movies.len()),
        Err(err) => finder_debug!("Request {} failed: {}", request_id, err),
    }
    let _ = event_tx.send(EngineEvent::Completed { request_id, result });
}
