use bevy::prelude::*;

use crate::{
    EventEnvelope, EventJournal, EventPayload, EventQueue, EventResult, FrameCounter, HandlerRegistry,
    JournalEntry, MiddlewareChain,
};

/// Exclusive system: takes the pending batch, passes each event through the middleware chain
/// and hands game events to the handlers one at a time. The only place gameplay state changes.
pub fn reducer_system(world: &mut World) {
    let frame = world.resource::<FrameCounter>().0;
    let batch = world.resource_mut::<EventQueue>().take_batch();
    for env in batch {
        let Some(env) = world.resource_mut::<MiddlewareChain>().run(env) else { continue };
        let result = reduce_one(world, &env);
        if let EventResult::Error(msg) = &result {
            error!(event = ?env.payload, frame, "event handler failed: {msg}");
        } else {
            trace!(event = ?env.payload, ?result, frame, "reduced");
        }
        world
            .resource_mut::<EventJournal>()
            .record(JournalEntry { event: env, result, frame_processed: frame });
    }
}

fn reduce_one(world: &mut World, env: &EventEnvelope) -> EventResult {
    match &env.payload {
        // the registry is lent out so handlers can borrow the rest of the world
        EventPayload::Game(game) => {
            world.resource_scope(|world, mut handlers: Mut<HandlerRegistry>| handlers.dispatch(game, world))
        }
        // raw input nothing mapped
        EventPayload::Input(_) => EventResult::Ignored,
    }
}
