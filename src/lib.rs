pub mod app;
pub mod core;
pub mod debug;
pub mod interaction;
pub mod rendering;
pub mod ui;

// Curated re-exports
pub use app::game::{GamePlugin, SessionPlugin};
pub use core::config::{GameConfig, SceneConfig, WindowConfig};
pub use rendering::ship::BevyScene;
pub use ui::hud::ScoreBoard;
