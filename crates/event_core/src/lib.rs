//! event_core: every gameplay state change of the ship tapper goes through here.
//!
//! Producers (scene timers, tap picking, the keyboard) push [`EventEnvelope`]s onto the
//! [`EventQueue`] during `Update`. Once per frame, in `PostUpdate`, [`reducer_system`] runs the
//! [`MiddlewareChain`], hands each surviving game event to the [`EventHandler`]s one at a time
//! and records the outcome in the [`EventJournal`].

mod event;
mod journal;
mod middleware;
mod queue;
mod reducer;

pub use event::*;
pub use journal::*;
pub use middleware::*;
pub use queue::*;
pub use reducer::*;

use bevy::prelude::*;

pub const DEFAULT_JOURNAL_CAPACITY: usize = 512;

/// Ordering of producers inside `Update`: pending scene work is applied first, then animation
/// timers tick, then input is read, then the HUD redraws.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum EventFlowSet {
    SceneApply,
    SceneTick,
    InputCollect,
    UIUpdate,
}

/// Number of the frame being processed. Advanced in `PreUpdate`, so producers and the reducer
/// of one frame agree on it.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounter(pub u64);

fn advance_frame(mut frame: ResMut<FrameCounter>) {
    frame.0 += 1;
}

pub struct EventCorePlugin {
    pub journal_capacity: usize,
}

impl Default for EventCorePlugin {
    fn default() -> Self {
        Self { journal_capacity: DEFAULT_JOURNAL_CAPACITY }
    }
}

impl Plugin for EventCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameCounter>()
            .init_resource::<EventQueue>()
            .insert_resource(EventJournal::with_capacity(self.journal_capacity))
            .init_resource::<HandlerRegistry>()
            .init_resource::<MiddlewareChain>()
            .configure_sets(
                Update,
                (
                    EventFlowSet::SceneApply,
                    EventFlowSet::SceneTick,
                    EventFlowSet::InputCollect,
                    EventFlowSet::UIUpdate,
                )
                    .chain(),
            )
            .add_systems(PreUpdate, advance_frame)
            .add_systems(PostUpdate, reducer_system);
    }
}

/// Registration helpers; both require [`EventCorePlugin`] to be added first.
pub trait EventAppExt {
    fn add_event_handler(&mut self, handler: impl EventHandler + 'static) -> &mut Self;
    fn add_event_middleware(&mut self, mw: impl Middleware + 'static) -> &mut Self;
}

impl EventAppExt for App {
    fn add_event_handler(&mut self, handler: impl EventHandler + 'static) -> &mut Self {
        self.world_mut().resource_mut::<HandlerRegistry>().register(handler);
        self
    }

    fn add_event_middleware(&mut self, mw: impl Middleware + 'static) -> &mut Self {
        self.world_mut().resource_mut::<MiddlewareChain>().add(mw);
        self
    }
}
