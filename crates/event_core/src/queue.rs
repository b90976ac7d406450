use crate::{EventEnvelope, EventPayload, EventSourceTag, GameEvent};
use bevy::prelude::*;
use std::collections::VecDeque;

/// Events waiting for the next reduction, in arrival order.
///
/// Any system may push; only [`reducer_system`](crate::reducer_system) takes. Events pushed
/// while a batch is being reduced wait for the following frame.
#[derive(Resource, Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<EventEnvelope>,
}

impl EventQueue {
    pub fn push(&mut self, env: EventEnvelope) {
        self.pending.push_back(env);
    }

    pub fn push_game(&mut self, game: GameEvent, source: EventSourceTag, frame: u64) {
        self.push(EventEnvelope::new(EventPayload::Game(game), source, frame));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn take_batch(&mut self) -> Vec<EventEnvelope> {
        self.pending.drain(..).collect()
    }
}
