use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

use crate::models::Selection;

/// Published whenever the dashboard's single piece of mutable state changes
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    SelectionChanged { selection: Selection },
}

/// Owns the current selection and fans changes out to subscribers
#[derive(Debug)]
pub struct SelectionState {
    current: Selection,
    broadcast_sender: broadcast::Sender<StateUpdate>,
    broadcast_receiver: broadcast::Receiver<StateUpdate>,
}

impl SelectionState {
    pub fn new() -> Self {
        let (broadcast_sender, broadcast_receiver) = broadcast::channel::<StateUpdate>(100);

        Self {
            current: Selection::None,
            broadcast_sender,
            broadcast_receiver,
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Pick a company; returns false when it was already selected
    pub fn select(&mut self, company: &str) -> bool {
        self.set(Selection::company(company))
    }

    /// Back to the initial "no company selected" state
    pub fn clear(&mut self) -> bool {
        self.set(Selection::None)
    }

    fn set(&mut self, selection: Selection) -> bool {
        if self.current == selection {
            return false;
        }
        debug!("Selection changed: {} -> {}", self.current, selection);
        self.current = selection.clone();

        // No subscribers is fine; the owned receiver keeps the channel open
        let _ = self
            .broadcast_sender
            .send(StateUpdate::SelectionChanged { selection });
        true
    }

    /// Pending updates in publish order. A lagged receiver skips ahead.
    pub fn drain_updates(&mut self) -> Vec<StateUpdate> {
        let mut updates = Vec::new();
        loop {
            match self.broadcast_receiver.try_recv() {
                Ok(update) => updates.push(update),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("Skipped {} stale selection updates", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        updates
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateUpdate> {
        self.broadcast_sender.subscribe()
    }

    pub fn get_status_text(&self) -> String {
        match &self.current {
            Selection::None => "Ready - no company selected".to_string(),
            Selection::Company(name) => format!("Showing {}", name),
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
