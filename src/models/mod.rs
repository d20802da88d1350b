pub mod emotion;
pub mod window;

pub use emotion::{EccStage, EmotionalEntry, EmotionalPattern};
pub use window::{DesktopWindow, WindowStatus};
