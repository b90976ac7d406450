#![allow(dead_code)]

use bevy::prelude::*;
use event_core::*;

/// Records every game event it sees, in order.
#[derive(Resource, Default, Debug)]
pub struct Seen {
    pub events: Vec<GameEvent>,
}

impl Seen {
    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

pub struct RecordingHandler;
impl EventHandler for RecordingHandler {
    fn handle(&mut self, ev: &GameEvent, world: &mut World) -> EventResult {
        world.get_resource_or_insert_with::<Seen>(Default::default).events.push(*ev);
        EventResult::Handled
    }
    fn name(&self) -> &'static str {
        "RecordingHandler"
    }
}

/// Fails on every tap, ignores everything else.
pub struct FailingTapHandler;
impl EventHandler for FailingTapHandler {
    fn handle(&mut self, ev: &GameEvent, _world: &mut World) -> EventResult {
        match ev {
            GameEvent::TapHit(h) => EventResult::Error(format!("cannot resolve {h}")),
            _ => EventResult::Ignored,
        }
    }
    fn name(&self) -> &'static str {
        "FailingTapHandler"
    }
}

pub fn handle(index: u32, generation: u64) -> TargetHandle {
    TargetHandle::new(index, generation)
}

pub fn enqueue_key(app: &mut App, key: KeyCode) {
    let frame = app.world().resource::<FrameCounter>().0;
    app.world_mut()
        .resource_mut::<EventQueue>()
        .push(EventEnvelope::new(EventPayload::Input(InputEvent::KeyDown(key)), EventSourceTag::Input, frame));
}
