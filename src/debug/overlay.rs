use bevy::prelude::*;
use event_core::EventQueue;
use game_core::Session;

use super::stats::DebugStats;

/// Corner readout of frame rate and session state.
#[derive(Component)]
pub struct DebugOverlayText;

pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        Name::new("DebugOverlay"),
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.8, 0.9, 1.0, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
        DebugOverlayText,
    ));
}

pub fn overlay_text(stats: &DebugStats, session: Option<&Session>, pending: usize) -> String {
    let mut text = format!("fps {:.0}  {:.1} ms", stats.fps, stats.frame_time_ms);
    if let Some(session) = session {
        let st = session.state();
        text.push_str(&format!("\n{:?}  duration {:.2}s", st.phase, st.duration));
    }
    text.push_str(&format!("\nqueued {pending}"));
    text
}

pub fn update_debug_overlay(
    stats: Res<DebugStats>,
    session: Option<Res<Session>>,
    queue: Res<EventQueue>,
    mut q: Query<&mut Text, With<DebugOverlayText>>,
) {
    let session_changed = session.as_ref().is_some_and(|s| s.is_changed());
    if !stats.is_changed() && !session_changed {
        return;
    }
    let text = overlay_text(&stats, session.as_deref(), queue.len());
    for mut t in &mut q {
        t.0.clone_from(&text);
    }
}
