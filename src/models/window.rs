use serde::{Deserialize, Serialize};

/// A virtual panel tracked by the window store. `id` names the application
/// type, so at most one window per id is open at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DesktopWindow {
    pub id: String,
    pub title: String,
    pub minimized: bool,
    pub maximized: bool,
}

impl DesktopWindow {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            minimized: false,
            maximized: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WindowStatus {
    Closed,
    OpenUnfocused,
    OpenFocused,
}

impl Default for WindowStatus {
    fn default() -> Self {
        WindowStatus::Closed
    }
}
