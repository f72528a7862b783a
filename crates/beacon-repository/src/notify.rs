//! Change notification
//!
//! After every successful save the store tells open views to refresh. A
//! notification with nobody listening is not an error.

use tokio::sync::broadcast;
use tracing::debug;

/// Message sent to views after stored data changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The listed storage keys were rewritten
    RefreshUi { keys: Vec<String> },
}

/// Delivers change events to whoever renders the overlay
pub trait ChangeNotifier: Send + Sync {
    fn notify(&self, event: ChangeEvent);
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn notify(&self, _event: ChangeEvent) {}
}

/// Fan-out to any number of subscribers
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl BroadcastNotifier {
    /// `capacity` events are buffered per subscriber before the oldest are dropped
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ChangeNotifier for BroadcastNotifier {
    fn notify(&self, event: ChangeEvent) {
        match self.sender.send(event) {
            Ok(listeners) => debug!(listeners, "refresh broadcast"),
            Err(_) => debug!("refresh dropped, no open views"),
        }
    }
}
