pub(crate) mod commands;
pub mod controller;
pub mod render;
pub mod state;

pub use controller::{WindowController, WindowHandle, WindowsSnapshot};
pub use render::{render_windows, RenderedWindow, DEFAULT_BASE_Z_INDEX};
pub use state::WindowState;
