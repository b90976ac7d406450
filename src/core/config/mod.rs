pub mod config;

pub use config::{rgb, EventConfig, GameConfig, SceneConfig, WindowConfig};
