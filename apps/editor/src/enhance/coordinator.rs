//! Per-field enhancement request tracking.
//!
//! Completed requests are not applied from the spawned task. Each task emits
//! an [`EnhanceOutcome`] message on an mpsc channel; the session's single
//! state-update handler consumes outcomes and writes them into the document,
//! preserving the single-writer discipline without locks.

use std::collections::HashSet;

use tokio::sync::mpsc;
use tracing::debug;

use super::{EnhanceClient, EnhanceKey};

/// A finished enhancement, ready to be routed into the document model.
#[derive(Debug, Clone)]
pub struct EnhanceOutcome {
    pub key: EnhanceKey,
    pub text: String,
}

/// Tracks which request keys are in flight and spawns the tasks that resolve
/// them. Busy state is a boolean per key: a second request for the same key
/// is permitted (not deduplicated), and the first completion clears the flag
/// even if the second is still outstanding — same-key races are accepted and
/// resolve last-write-wins by completion order.
pub struct Coordinator {
    client: EnhanceClient,
    in_flight: HashSet<EnhanceKey>,
    tx: mpsc::UnboundedSender<EnhanceOutcome>,
}

impl Coordinator {
    /// Returns the coordinator plus the receiving end of its outcome channel.
    /// The receiver must be owned by the single state-update handler.
    pub fn new(client: EnhanceClient) -> (Self, mpsc::UnboundedReceiver<EnhanceOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                client,
                in_flight: HashSet::new(),
                tx,
            },
            rx,
        )
    }

    /// Marks `key` in progress and spawns the enhancement task for it. The
    /// task never fails; failure is absorbed inside the client's fallback.
    pub fn spawn(&mut self, key: EnhanceKey, content: String) {
        self.in_flight.insert(key.clone());
        debug!(key = %key, "enhancement started");

        let client = self.client.clone();
        let tx = self.tx.clone();
        let section = key.section();
        tokio::spawn(async move {
            let text = client.enhance(&section, &content).await;
            // Receiver dropped means the session is gone; nothing to apply.
            let _ = tx.send(EnhanceOutcome { key, text });
        });
    }

    pub fn is_in_flight(&self, key: &EnhanceKey) -> bool {
        self.in_flight.contains(key)
    }

    pub fn any_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Clears the busy flag for a completed request.
    pub(crate) fn complete(&mut self, key: &EnhanceKey) {
        self.in_flight.remove(key);
        debug!(key = %key, "enhancement finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_flight_state_is_per_key_not_per_section() {
        let (mut coordinator, _rx) = Coordinator::new(EnhanceClient::offline());

        coordinator.spawn(EnhanceKey::Experience(1), "a".into());

        assert!(coordinator.is_in_flight(&EnhanceKey::Experience(1)));
        assert!(
            !coordinator.is_in_flight(&EnhanceKey::Experience(2)),
            "another entry of the same section must not be marked busy"
        );
        assert!(!coordinator.is_in_flight(&EnhanceKey::Summary));
    }

    #[tokio::test]
    async fn outcome_arrives_on_the_channel_and_clears_the_flag() {
        let (mut coordinator, mut rx) = Coordinator::new(EnhanceClient::offline());

        coordinator.spawn(EnhanceKey::Summary, "X".into());
        let outcome = rx.recv().await.expect("outcome");
        coordinator.complete(&outcome.key);

        assert_eq!(outcome.key, EnhanceKey::Summary);
        assert!(outcome.text.starts_with('X'));
        assert!(!coordinator.any_in_flight());
    }
}
