use serde::Serialize;

use crate::models::{DesktopWindow, WindowStatus};

/// Open windows in opening order plus the focused id.
///
/// Invariants: ids are unique within `open_windows`, and `active_window`
/// always names an open window.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    open_windows: Vec<DesktopWindow>,
    active_window: Option<String>,
}

impl WindowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_windows(&self) -> &[DesktopWindow] {
        &self.open_windows
    }

    pub fn active_window(&self) -> Option<&str> {
        self.active_window.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn status(&self, id: &str) -> WindowStatus {
        match (self.is_open(id), self.active_window()) {
            (false, _) => WindowStatus::Closed,
            (true, Some(active)) if active == id => WindowStatus::OpenFocused,
            (true, _) => WindowStatus::OpenUnfocused,
        }
    }

    /// Appends the window unless one with `id` is already open, then focuses
    /// it. Returns whether anything changed.
    pub fn open(&mut self, id: &str, title: &str) -> bool {
        let mut changed = false;
        if !self.is_open(id) {
            self.open_windows.push(DesktopWindow::new(id, title));
            changed = true;
        }
        if self.active_window() != Some(id) {
            self.active_window = Some(id.to_string());
            changed = true;
        }
        changed
    }

    /// Removes the window if present. Closing the focused window hands focus
    /// to the most recently opened survivor.
    pub fn close(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.open_windows.remove(index);

        if self.active_window() == Some(id) {
            self.active_window = self.open_windows.last().map(|window| window.id.clone());
        }
        true
    }

    /// Focus only lands on open windows; anything else is ignored.
    pub fn focus(&mut self, id: &str) -> bool {
        if !self.is_open(id) || self.active_window() == Some(id) {
            return false;
        }
        self.active_window = Some(id.to_string());
        true
    }

    /// Returns the new minimized flag, `None` if the window is not open.
    pub fn toggle_minimize(&mut self, id: &str) -> Option<bool> {
        let window = self.window_mut(id)?;
        window.minimized = !window.minimized;
        Some(window.minimized)
    }

    /// Returns the new maximized flag, `None` if the window is not open.
    pub fn toggle_maximize(&mut self, id: &str) -> Option<bool> {
        let window = self.window_mut(id)?;
        window.maximized = !window.maximized;
        Some(window.maximized)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.open_windows.iter().position(|window| window.id == id)
    }

    fn window_mut(&mut self, id: &str) -> Option<&mut DesktopWindow> {
        self.open_windows.iter_mut().find(|window| window.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(state: &WindowState) -> Vec<&str> {
        state.open_windows().iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn starts_empty() {
        let state = WindowState::new();
        assert!(state.open_windows().is_empty());
        assert_eq!(state.active_window(), None);
        assert_eq!(state.status("ei-dashboard"), WindowStatus::Closed);
    }

    #[test]
    fn open_count_matches_distinct_ids() {
        let mut state = WindowState::new();
        for id in ["sage", "pulse", "sage", "dna-engine", "pulse", "sage"] {
            state.open(id, id);
        }
        assert_eq!(ids(&state), vec!["sage", "pulse", "dna-engine"]);
    }

    #[test]
    fn reopening_focuses_without_duplicating() {
        let mut state = WindowState::new();
        assert!(state.open("x", "X"));
        assert_eq!(state.active_window(), Some("x"));

        state.open("y", "Y");
        assert!(state.open("x", "X"));
        assert_eq!(state.open_windows().len(), 2);
        assert_eq!(state.active_window(), Some("x"));

        assert!(!state.open("x", "X"));
        assert_eq!(state.open_windows().iter().filter(|w| w.id == "x").count(), 1);
    }

    #[test]
    fn reopening_keeps_original_title() {
        let mut state = WindowState::new();
        state.open("sage", "Sage");
        state.open("sage", "Renamed");
        assert_eq!(state.open_windows()[0].title, "Sage");
    }

    #[test]
    fn closing_active_focuses_most_recent_survivor() {
        let mut state = WindowState::new();
        state.open("a", "A");
        state.open("b", "B");
        state.open("c", "C");
        state.focus("b");

        assert!(state.close("b"));
        assert_eq!(ids(&state), vec!["a", "c"]);
        assert_eq!(state.active_window(), Some("c"));
    }

    #[test]
    fn closing_last_window_clears_focus() {
        let mut state = WindowState::new();
        state.open("only", "Only");
        assert!(state.close("only"));
        assert_eq!(state.active_window(), None);
        assert!(state.open_windows().is_empty());
    }

    #[test]
    fn closing_background_window_keeps_focus() {
        let mut state = WindowState::new();
        state.open("a", "A");
        state.open("b", "B");
        state.close("a");
        assert_eq!(state.active_window(), Some("b"));
    }

    #[test]
    fn closing_unknown_window_is_noop() {
        let mut state = WindowState::new();
        state.open("a", "A");
        let before = state.clone();
        assert!(!state.close("ghost"));
        assert_eq!(state, before);
    }

    #[test]
    fn focusing_unopened_window_is_ignored() {
        let mut state = WindowState::new();
        state.open("a", "A");
        assert!(!state.focus("ghost"));
        assert_eq!(state.active_window(), Some("a"));
    }

    #[test]
    fn status_cycles_through_all_states() {
        let mut state = WindowState::new();
        state.open("a", "A");
        assert_eq!(state.status("a"), WindowStatus::OpenFocused);

        state.open("b", "B");
        assert_eq!(state.status("a"), WindowStatus::OpenUnfocused);

        state.focus("a");
        assert_eq!(state.status("a"), WindowStatus::OpenFocused);

        state.close("a");
        assert_eq!(state.status("a"), WindowStatus::Closed);

        state.open("a", "A");
        assert_eq!(state.status("a"), WindowStatus::OpenFocused);
    }

    #[test]
    fn frame_toggles_only_touch_open_windows() {
        let mut state = WindowState::new();
        state.open("a", "A");
        assert_eq!(state.toggle_minimize("a"), Some(true));
        assert_eq!(state.toggle_minimize("a"), Some(false));
        assert_eq!(state.toggle_maximize("a"), Some(true));
        assert_eq!(state.toggle_maximize("ghost"), None);
        assert!(state.open_windows()[0].maximized);
    }
}
