use bevy::diagnostic::{DiagnosticPath, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

/// Smoothed frame statistics, read from Bevy's frame time diagnostics.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DebugStats {
    pub fps: f64,
    pub frame_time_ms: f64,
}

impl DebugStats {
    /// Zero for diagnostics that have no measurement yet.
    pub fn from_diagnostics(store: &DiagnosticsStore) -> Self {
        let read = |path: &DiagnosticPath| store.get(path).and_then(|d| d.smoothed()).unwrap_or(0.0);
        Self {
            fps: read(&FrameTimeDiagnosticsPlugin::FPS),
            frame_time_ms: read(&FrameTimeDiagnosticsPlugin::FRAME_TIME),
        }
    }
}

pub fn debug_stats_collect_system(store: Res<DiagnosticsStore>, mut stats: ResMut<DebugStats>) {
    stats.set_if_neq(DebugStats::from_diagnostics(&store));
}
