use serde::Serialize;

use crate::catalog::Panel;

use super::WindowState;

pub const DEFAULT_BASE_Z_INDEX: u32 = 1000;

/// What the window manager draws for one open window. The front end wires the
/// close and focus buttons to the `close_window` / `focus_window` commands
/// keyed by `id`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedWindow {
    pub id: String,
    pub title: String,
    pub panel: Panel,
    pub z_index: u32,
    pub is_active: bool,
    pub minimized: bool,
    pub maximized: bool,
}

/// Stacking follows opening order; focus rings a window but never raises it.
pub fn render_windows(state: &WindowState, base_z_index: u32) -> Vec<RenderedWindow> {
    let active = state.active_window();
    state
        .open_windows()
        .iter()
        .enumerate()
        .map(|(index, window)| RenderedWindow {
            id: window.id.clone(),
            title: window.title.clone(),
            panel: Panel::resolve(&window.id),
            z_index: base_z_index.saturating_add(u32::try_from(index).unwrap_or(u32::MAX)),
            is_active: active == Some(window.id.as_str()),
            minimized: window.minimized,
            maximized: window.maximized,
        })
        .collect()
}
