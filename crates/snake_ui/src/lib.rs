pub mod layer;
pub mod screens;

pub use layer::{DebugStats, UiLayer};
pub use screens::{GameView, Screen, UiActions};
