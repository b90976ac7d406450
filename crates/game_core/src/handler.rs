use std::marker::PhantomData;

use bevy::prelude::*;
use event_core::{EventHandler, EventResult, GameEvent};

use crate::{CycleTuning, Outcome, Scene, ScoreDisplay, SpawnCycle};

/// The one owned game state of the running app.
#[derive(Resource, Deref, DerefMut)]
pub struct Session(pub SpawnCycle);

impl Session {
    pub fn new(tuning: CycleTuning) -> Self {
        Self(SpawnCycle::new(tuning))
    }
}

/// Last non-ignored outcome, for UI and diagnostics.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LastOutcome(pub Option<Outcome>);

/// Routes reduced game events into [`Session`], lending it the `S` scene and `D` display
/// resources for the duration of one event.
pub struct SpawnCycleHandler<S, D> {
    _marker: PhantomData<fn() -> (S, D)>,
}

impl<S, D> Default for SpawnCycleHandler<S, D> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<S, D> EventHandler for SpawnCycleHandler<S, D>
where
    S: Scene + Resource,
    D: ScoreDisplay + Resource,
{
    fn handle(&mut self, ev: &GameEvent, world: &mut World) -> EventResult {
        let result = world.resource_scope(|world, mut session: Mut<Session>| {
            world.resource_scope(|world, mut scene: Mut<S>| {
                let mut display = world.resource_mut::<D>();
                session.handle_event(ev, &mut *scene, &mut *display)
            })
        });
        match result {
            Ok(Outcome::Ignored) => EventResult::Ignored,
            Ok(outcome) => {
                world.insert_resource(LastOutcome(Some(outcome)));
                EventResult::Handled
            }
            Err(e) => EventResult::Error(e.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "SpawnCycleHandler"
    }
}
