use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events published by the shell as it moves through its lifecycle and
/// dispatches user-facing commands. The window host subscribes to react
/// (e.g. `QuitRequested` is its cue to issue a close request).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ShellEvent {
    Started,
    Ready,
    QuitRequested,
    CloseVetoed,
    CloseAccepted,
    MenuCommand(String),
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<ShellEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.sender.subscribe()
    }

    /// Publish an event, returning the number of subscribers that saw it.
    pub fn publish(&self, event: ShellEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
