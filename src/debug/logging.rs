use bevy::prelude::*;
use event_core::{EventJournal, EventQueue, EventResult, FrameCounter};
use game_core::Session;

use super::stats::DebugStats;

#[derive(Resource, Debug)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
}

impl DebugState {
    pub fn new(log_interval: f32) -> Self {
        Self { log_interval, time_accum: 0.0 }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JournalSummary {
    pub handled: usize,
    pub ignored: usize,
    pub errors: usize,
}

pub fn summarize_journal(journal: &EventJournal) -> JournalSummary {
    journal.iter().fold(JournalSummary::default(), |mut s, j| {
        match j.result {
            EventResult::Handled => s.handled += 1,
            EventResult::Ignored => s.ignored += 1,
            EventResult::Error(_) => s.errors += 1,
        }
        s
    })
}

pub fn debug_logging_system(
    time: Res<Time>,
    frame: Res<FrameCounter>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
    queue: Res<EventQueue>,
    journal: Res<EventJournal>,
    session: Option<Res<Session>>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    let s = summarize_journal(&journal);
    let Some(session) = session else { return };
    let st = session.state();
    info!(
        "SESSION frame={} t={:.1}s fps={:.1} ft_ms={:.1} phase={:?} score={} duration={:.3}s game_over={} journal(handled={} ignored={} errors={}) pending={}",
        frame.0,
        time.elapsed_secs(),
        stats.fps,
        stats.frame_time_ms,
        st.phase,
        st.score,
        st.duration,
        st.game_over,
        s.handled,
        s.ignored,
        s.errors,
        queue.len()
    );
}
