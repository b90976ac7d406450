//! Debug module: feature gated frame statistics, an on-screen readout and periodic
//! session/journal logging. Built only with `--features debug` (on by default).

#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod overlay;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use logging::{summarize_journal, DebugState, JournalSummary};
#[cfg(feature = "debug")]
pub use overlay::{overlay_text, DebugOverlayText};
#[cfg(feature = "debug")]
pub use stats::DebugStats;

use bevy::prelude::*;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(feature = "debug"))]
        let _ = app;
        #[cfg(feature = "debug")]
        {
            use crate::core::config::GameConfig;
            use bevy::diagnostic::FrameTimeDiagnosticsPlugin;

            if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
                app.add_plugins(FrameTimeDiagnosticsPlugin::default());
            }
            app.init_resource::<DebugStats>()
                .add_systems(Startup, overlay::spawn_debug_overlay)
                .add_systems(
                    Last,
                    (stats::debug_stats_collect_system, overlay::update_debug_overlay).chain(),
                );

            let interval = app
                .world()
                .get_resource::<GameConfig>()
                .map(|c| c.events.log_interval)
                .unwrap_or(5.0);
            if interval > 0.0 {
                app.insert_resource(DebugState::new(interval)).add_systems(
                    Last,
                    logging::debug_logging_system.after(stats::debug_stats_collect_system),
                );
            }
        }
    }
}
