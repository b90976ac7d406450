//! Ship Tapper: tap the incoming ship before it reaches you.
//!
//! Usage:
//!   cargo run -- --config assets/config/game.ron --seed 7 --auto-close 30

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use ship_tapper::app::game::ConfigWarnings;
use ship_tapper::interaction::session::config_hot_reload::ConfigReloadSettings;
use ship_tapper::{GameConfig, GamePlugin};

const DEFAULT_CONFIG: &str = "assets/config/game.ron";

#[derive(Parser, Debug)]
#[command(about = "Tap the ship before it reaches you", version, author)]
struct Args {
    /// Base RON config; a sibling `game.local.ron` is layered on top when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed RNG seed for spawn positions (overrides `cycle.seed`).
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds (overrides `window.autoClose`).
    #[arg(long)]
    auto_close: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let base = match &args.config {
        Some(p) if !p.exists() => anyhow::bail!("config file {} not found", p.display()),
        Some(p) => p.clone(),
        None => PathBuf::from(DEFAULT_CONFIG),
    };
    let local = base.with_file_name("game.local.ron");
    let watched = vec![base.clone(), local.clone()];
    let mut paths = vec![base];
    if local.exists() {
        paths.push(local);
    }

    let (mut cfg, used, mut warnings) = GameConfig::load_layered(&paths);
    if used.is_empty() {
        warnings.push("no config file loaded; using built-in defaults".into());
    }
    if let Some(seed) = args.seed {
        cfg.cycle.seed = Some(seed);
    }
    if let Some(secs) = args.auto_close {
        cfg.window.auto_close = secs;
    }
    warnings.extend(cfg.validate());

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.window.title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ConfigReloadSettings {
        paths: watched,
        ..default()
    })
    .insert_resource(ConfigWarnings(warnings))
    .insert_resource(cfg)
    .add_plugins(GamePlugin);

    if let AppExit::Error(code) = app.run() {
        anyhow::bail!("ship_tapper exited with error code {code}");
    }
    Ok(())
}
