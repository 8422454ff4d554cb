use crate::error::PortalAppError;

use portal_core::portal::{Action, ActionOutcome, Portal};
use portal_core::storage::Storage;
use portal_core::views::Page;

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{RwLock, mpsc, oneshot};

const COMMAND_CHANNEL_CAPACITY: usize = 100;

/// Commands handled by the state actor.
///
/// All portal mutations go through the actor via these commands, so actions
/// are applied one at a time and server calls never interleave.
#[derive(Debug)]
pub enum StateCommand {
    /// Apply an action and answer with its outcome
    Dispatch {
        action: Action,
        reply: oneshot::Sender<ActionOutcome>,
    },
}

/// Handle to the portal running inside the state actor.
///
/// Reads of the current page come from a snapshot refreshed after every
/// command, so they never wait on an in-flight server call.
#[derive(Clone)]
pub struct PortalState {
    command_tx: mpsc::Sender<StateCommand>,
    page: Arc<RwLock<Page>>,
}

impl PortalState {
    /// Move `portal` into a freshly spawned actor task.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn spawn<S: Storage + 'static>(portal: Portal<S>) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let page = Arc::new(RwLock::new(portal.page()));

        tokio::spawn(state_actor(command_rx, portal, Arc::clone(&page)));
        info!("State actor spawned");

        Self { command_tx, page }
    }

    /// Apply an action and wait for its outcome.
    pub async fn dispatch(&self, action: Action) -> Result<ActionOutcome, PortalAppError> {
        let (reply, outcome) = oneshot::channel();

        self.command_tx
            .send(StateCommand::Dispatch { action, reply })
            .await
            .map_err(|e| PortalAppError::state(format!("State actor died: {e}")))?;

        outcome
            .await
            .map_err(|e| PortalAppError::state(format!("State actor dropped the reply: {e}")))
    }

    /// The page as of the last processed command.
    pub async fn page(&self) -> Page {
        self.page.read().await.clone()
    }
}

/// Owns the portal and processes commands sequentially.
async fn state_actor<S: Storage>(
    mut command_rx: mpsc::Receiver<StateCommand>,
    mut portal: Portal<S>,
    page: Arc<RwLock<Page>>,
) {
    info!("State actor started");

    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            StateCommand::Dispatch { action, reply } => {
                debug!("Dispatching '{}'", action.name());
                let outcome = portal.dispatch(action).await;

                *page.write().await = portal.page();

                if reply.send(outcome).is_err() {
                    warn!("Caller stopped waiting for an action outcome");
                }
            }
        }
    }

    info!("State actor stopped");
}
