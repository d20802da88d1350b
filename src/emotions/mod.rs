pub(crate) mod commands;
pub mod config;
pub mod controller;
pub mod patterns;
pub mod state;

pub use config::{EmotionalConfig, IntensityAveraging};
pub use controller::EmotionalController;
pub use state::{EmotionalSnapshot, EmotionalState, NewEntry};
