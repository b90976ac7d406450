use bevy::prelude::*;
use event_core::{
    DebounceMiddleware, EventAppExt, EventCorePlugin, EventJournal, EventQueue, EventResult, EventSourceTag,
    FrameCounter, GameEvent, KeyMappingMiddleware,
};
use game_core::{Session, SpawnCyclePlugin};

use crate::core::config::GameConfig;
use crate::debug::DebugPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::interaction::tap::TapPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::ship::{BevyScene, ShipScenePlugin};
use crate::ui::hud::{HudPlugin, ScoreBoard};

/// Config problems found before logging was up; reported once at startup.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConfigWarnings(pub Vec<String>);

/// Everything that runs without a window: event core, spawn cycle, ship scene adapter, HUD
/// model. Reads `GameConfig` at build time (defaults if absent).
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.init_resource::<GameConfig>();
        }
        let cfg = app.world().resource::<GameConfig>().clone();
        app.add_plugins(EventCorePlugin {
            journal_capacity: cfg.events.journal_capacity,
        })
        .add_event_middleware(KeyMappingMiddleware::with_default_gameplay())
        .add_event_middleware(
            DebounceMiddleware::new(cfg.events.restart_debounce_frames).only(&["StartSession"]),
        )
        .add_plugins((ShipScenePlugin, HudPlugin))
        .add_plugins(SpawnCyclePlugin::<BevyScene, ScoreBoard>::new(cfg.cycle.clone()))
        .init_resource::<ConfigWarnings>()
        .add_systems(Startup, (report_config_warnings, begin_session))
        .add_systems(Update, forward_cycle_tuning)
        .add_systems(Last, abort_on_fatal);
    }
}

/// Full windowed game.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            SessionPlugin,
            CameraPlugin,
            TapPlugin,
            DebugPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
        ));
    }
}

fn report_config_warnings(warnings: Res<ConfigWarnings>) {
    for w in &warnings.0 {
        warn!("config: {w}");
    }
}

fn begin_session(frame: Res<FrameCounter>, mut queue: ResMut<EventQueue>) {
    queue.push_game(GameEvent::StartSession, EventSourceTag::System, frame.0);
}

/// Reloaded cycle tuning takes effect at the next session start.
fn forward_cycle_tuning(cfg: Res<GameConfig>, mut session: ResMut<Session>) {
    if !cfg.is_changed() || cfg.is_added() {
        return;
    }
    if session.tuning() != &cfg.cycle {
        info!("cycle tuning changed; applies from the next session");
        session.retune(cfg.cycle.clone());
    }
}

/// A scene failure while spawning is unrecoverable: report it and stop the app.
pub fn abort_on_fatal(
    frame: Res<FrameCounter>,
    journal: Res<EventJournal>,
    mut exit: EventWriter<AppExit>,
) {
    let mut failed = false;
    for entry in journal.errors_in_frame(frame.0) {
        if let EventResult::Error(msg) = &entry.result {
            error!(event = ?entry.event.payload, "fatal: {msg}");
        }
        failed = true;
    }
    if failed {
        exit.write(AppExit::error());
    }
}
