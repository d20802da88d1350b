use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    catalog,
    events::{Notifier, StoreEvent},
    models::{DesktopWindow, WindowStatus},
};

use super::{render_windows, RenderedWindow, WindowState};

const ENABLE_LOGS: bool = true;

use crate::log_info;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WindowsSnapshot {
    pub open_windows: Vec<DesktopWindow>,
    pub active_window: Option<String>,
    pub rendered: Vec<RenderedWindow>,
}

impl WindowsSnapshot {
    pub fn from_state(state: &WindowState, base_z_index: u32) -> Self {
        Self {
            open_windows: state.open_windows().to_vec(),
            active_window: state.active_window().map(str::to_string),
            rendered: render_windows(state, base_z_index),
        }
    }
}

#[derive(Clone)]
pub struct WindowController {
    state: Arc<Mutex<WindowState>>,
    notifier: Notifier,
    base_z_index: u32,
}

impl WindowController {
    pub fn new(notifier: Notifier, base_z_index: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(WindowState::new())),
            notifier,
            base_z_index,
        }
    }

    pub async fn get_snapshot(&self) -> WindowsSnapshot {
        let guard = self.state.lock().await;
        WindowsSnapshot::from_state(&guard, self.base_z_index)
    }

    pub async fn rendered_windows(&self) -> Vec<RenderedWindow> {
        let guard = self.state.lock().await;
        render_windows(&guard, self.base_z_index)
    }

    pub async fn window_status(&self, id: &str) -> WindowStatus {
        self.state.lock().await.status(id)
    }

    pub async fn open_window(&self, id: &str, title: &str) -> WindowsSnapshot {
        self.mutate(|state| {
            let opened = !state.is_open(id);
            let changed = state.open(id, title);
            if opened {
                log_info!("opened window {id} ({title})");
            }
            changed
        })
        .await
    }

    /// Opens `id` titled with its catalog name.
    pub async fn launch_app(&self, id: &str) -> WindowsSnapshot {
        let title = catalog::launch_title(id);
        self.open_window(id, &title).await
    }

    pub async fn close_window(&self, id: &str) -> WindowsSnapshot {
        self.mutate(|state| {
            let closed = state.close(id);
            if closed {
                log_info!("closed window {id}");
            } else {
                debug!("close ignored for unopened window {id}");
            }
            closed
        })
        .await
    }

    pub async fn focus_window(&self, id: &str) -> WindowsSnapshot {
        self.mutate(|state| {
            let focused = state.focus(id);
            if !focused && !state.is_open(id) {
                debug!("focus ignored for unopened window {id}");
            }
            focused
        })
        .await
    }

    pub async fn toggle_minimize(&self, id: &str) -> WindowsSnapshot {
        self.mutate(|state| state.toggle_minimize(id).is_some()).await
    }

    pub async fn toggle_maximize(&self, id: &str) -> WindowsSnapshot {
        self.mutate(|state| state.toggle_maximize(id).is_some()).await
    }

    /// Close/focus actions bound to one window, for the window frame.
    pub fn handle(&self, id: impl Into<String>) -> WindowHandle {
        WindowHandle {
            id: id.into(),
            controller: self.clone(),
        }
    }

    /// Applies `op` and publishes a snapshot when it reports a change.
    async fn mutate<F>(&self, op: F) -> WindowsSnapshot
    where
        F: FnOnce(&mut WindowState) -> bool,
    {
        let mut guard = self.state.lock().await;
        let changed = op(&mut *guard);
        let snapshot = WindowsSnapshot::from_state(&guard, self.base_z_index);
        if changed {
            self.notifier
                .publish(StoreEvent::WindowsChanged(snapshot.clone()));
        }
        snapshot
    }
}

#[derive(Clone)]
pub struct WindowHandle {
    id: String,
    controller: WindowController,
}

impl WindowHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn close(&self) -> WindowsSnapshot {
        self.controller.close_window(&self.id).await
    }

    pub async fn focus(&self) -> WindowsSnapshot {
        self.controller.focus_window(&self.id).await
    }
}
