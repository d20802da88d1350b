//! Change notification for the stores.
//!
//! Each controller publishes a full snapshot after every mutation. Rust-side
//! observers call [`Notifier::subscribe`]; the webview receives the same
//! snapshots as Tauri events through [`forward_to_frontend`].

use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tokio::sync::broadcast;

use crate::emotions::EmotionalSnapshot;
use crate::windows::WindowsSnapshot;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

const EVENT_BUFFER: usize = 64;

pub const WINDOWS_CHANGED: &str = "windows-changed";
pub const EMOTIONAL_STATE_CHANGED: &str = "emotional-state-changed";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "snapshot", rename_all = "camelCase")]
pub enum StoreEvent {
    WindowsChanged(WindowsSnapshot),
    EmotionalStateChanged(EmotionalSnapshot),
}

impl StoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::WindowsChanged(_) => WINDOWS_CHANGED,
            StoreEvent::EmotionalStateChanged(_) => EMOTIONAL_STATE_CHANGED,
        }
    }
}

#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<StoreEvent>,
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Publishing with no subscribers is not an error.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Relays every store event to the webview until the notifier is dropped.
pub fn forward_to_frontend(app_handle: AppHandle, notifier: &Notifier) {
    let mut receiver = notifier.subscribe();

    tauri::async_runtime::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let name = event.name();
                    let result = match event {
                        StoreEvent::WindowsChanged(snapshot) => app_handle.emit(name, snapshot),
                        StoreEvent::EmotionalStateChanged(snapshot) => {
                            app_handle.emit(name, snapshot)
                        }
                    };
                    if let Err(err) = result {
                        log_warn!("failed to emit {name}: {err}");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log_warn!("frontend bridge lagged, skipped {skipped} store events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    log_info!("store notifier closed, frontend bridge exiting");
                    break;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::WindowState;

    fn windows_event() -> StoreEvent {
        StoreEvent::WindowsChanged(WindowsSnapshot::from_state(&WindowState::new(), 1000))
    }

    #[test]
    fn event_names_match_frontend_channels() {
        assert_eq!(windows_event().name(), "windows-changed");
    }

    #[test]
    fn event_serializes_with_kind_tag() {
        let value = serde_json::to_value(windows_event()).unwrap();
        assert_eq!(value["kind"], "windowsChanged");
        assert!(value["snapshot"]["openWindows"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn every_subscriber_sees_published_events() {
        let notifier = Notifier::new();
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        notifier.publish(windows_event());

        assert_eq!(first.recv().await.unwrap().name(), WINDOWS_CHANGED);
        assert_eq!(second.recv().await.unwrap().name(), WINDOWS_CHANGED);
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        Notifier::new().publish(windows_event());
    }
}
