//! game_core: the tap-the-ship scoring rules.
//!
//! [`SpawnCycle`] owns score, travel duration and the single live target. It never touches
//! rendering directly; it talks to a [`Scene`] and a [`ScoreDisplay`] and is driven by
//! `event_core::GameEvent`s reduced one at a time.

use bevy::prelude::*;
use event_core::EventAppExt;

pub mod handler;
pub mod scene;
pub mod spawn_cycle;
pub mod state;
pub mod targets;
pub mod tuning;

pub use handler::*;
pub use scene::*;
pub use spawn_cycle::*;
pub use state::*;
pub use targets::*;
pub use tuning::*;

pub use event_core::{GameEvent, TargetHandle};

/// Installs the [`Session`] resource and registers its event handler.
///
/// `S` and `D` must already be inserted (or be inserted before the first reduction).
/// Requires `EventCorePlugin`.
pub struct SpawnCyclePlugin<S, D> {
    pub tuning: CycleTuning,
    _marker: std::marker::PhantomData<fn() -> (S, D)>,
}

impl<S, D> SpawnCyclePlugin<S, D> {
    pub fn new(tuning: CycleTuning) -> Self {
        Self { tuning, _marker: std::marker::PhantomData }
    }
}

impl<S, D> Plugin for SpawnCyclePlugin<S, D>
where
    S: Scene + Resource,
    D: ScoreDisplay + Resource,
{
    fn build(&self, app: &mut App) {
        app.insert_resource(Session::new(self.tuning.clone()))
            .init_resource::<LastOutcome>()
            .add_event_handler(SpawnCycleHandler::<S, D>::default());
    }
}
