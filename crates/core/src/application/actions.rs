// Background List Actions
//
// Each user action runs as its own tokio task so callers never block on
// storage I/O. There is no queue and no cancellation: two actions in flight
// both run to completion and the last snapshot published wins.

use crate::application::ShoppingListService;
use crate::domain::{Item, ItemId};
use crate::error::{AppError, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A user action against the shopping list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Reload the list
    Refresh,
    /// Add a pending item with this name
    Add(String),
    /// Flip the purchased flag of this item
    Toggle(Item),
    Remove(ItemId),
    Clear,
}

/// Result of a completed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Listed(Vec<Item>),
    Added(ItemId),
    Cleared,
}

/// Runs list actions in the background and publishes list snapshots
///
/// Front ends hold a `watch::Receiver` from [`ListActions::subscribe`] and
/// redraw whenever a new snapshot arrives.
pub struct ListActions {
    service: Arc<ShoppingListService>,
    snapshot: Arc<watch::Sender<Vec<Item>>>,
}

impl ListActions {
    pub fn new(service: Arc<ShoppingListService>) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            service,
            snapshot: Arc::new(tx),
        }
    }

    /// Receive every list snapshot published after this call
    pub fn subscribe(&self) -> watch::Receiver<Vec<Item>> {
        self.snapshot.subscribe()
    }

    /// Latest published snapshot
    pub fn current(&self) -> Vec<Item> {
        self.snapshot.borrow().clone()
    }

    /// Spawn `action` as an independent task
    pub fn dispatch(&self, action: ListAction) -> JoinHandle<Result<ActionOutcome>> {
        let service = Arc::clone(&self.service);
        let snapshot = Arc::clone(&self.snapshot);

        tokio::spawn(async move {
            debug!(action = ?action, "Dispatching list action");
            let outcome = perform(&service, action).await;

            match &outcome {
                Ok(ActionOutcome::Listed(items)) => {
                    snapshot.send_replace(items.clone());
                }
                Ok(ActionOutcome::Cleared) => {
                    snapshot.send_replace(Vec::new());
                }
                // The add form does not show the list
                Ok(ActionOutcome::Added(_)) => {}
                Err(e) => warn!(error = %e, "List action failed"),
            }

            outcome
        })
    }

    /// Dispatch `action` and wait for it to finish
    pub async fn run(&self, action: ListAction) -> Result<ActionOutcome> {
        self.dispatch(action)
            .await
            .map_err(|e| AppError::Internal(format!("List action task failed: {}", e)))?
    }
}

async fn perform(service: &ShoppingListService, action: ListAction) -> Result<ActionOutcome> {
    match action {
        ListAction::Refresh => service.items().await.map(ActionOutcome::Listed),
        ListAction::Add(name) => service.add(&name).await.map(ActionOutcome::Added),
        ListAction::Toggle(item) => service.toggle(&item).await.map(ActionOutcome::Listed),
        ListAction::Remove(id) => service.remove(id).await.map(ActionOutcome::Listed),
        ListAction::Clear => service.clear().await.map(|_| ActionOutcome::Cleared),
    }
}
