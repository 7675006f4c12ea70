use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{PublicQuestion, RoundInfo, WinnerInfo};

/// Events pushed to every connected participant.
///
/// Serialized with an `event` tag whose values are the wire event names
/// clients listen for (`new-question`, `winner-announced`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    #[serde(rename_all = "camelCase")]
    NewQuestion {
        question: PublicQuestion,
        round: RoundInfo,
    },
    #[serde(rename_all = "camelCase")]
    WinnerAnnounced {
        winner: WinnerInfo,
        correct_answer: f64,
    },
    #[serde(rename_all = "camelCase")]
    UserJoined {
        username: String,
        participant_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    UserLeft {
        username: String,
        participant_count: usize,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::NewQuestion { .. } => "new-question",
            GameEvent::WinnerAnnounced { .. } => "winner-announced",
            GameEvent::UserJoined { .. } => "user-joined",
            GameEvent::UserLeft { .. } => "user-left",
        }
    }
}

pub struct EventBus {
    sender: broadcast::Sender<GameEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }

    /// Publish to all subscribers. Returns how many received it.
    pub fn publish(&self, event: GameEvent) -> usize {
        let name = event.name();
        match self.sender.send(event) {
            Ok(count) => count,
            Err(_) => {
                tracing::debug!(event = name, "No subscribers for event");
                0
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
