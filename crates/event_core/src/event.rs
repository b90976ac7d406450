use bevy::prelude::*;
use std::fmt;

/// Opaque identity of one spawned target.
///
/// `index` addresses a slot in a small target table and `generation` is bumped every time that
/// slot is freed, so a handle held by a late event never matches a newer target reusing the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetHandle {
    pub index: u32,
    pub generation: u64,
}

impl TargetHandle {
    pub const fn new(index: u32, generation: u64) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// External reset: begin a new session (only honoured while no target is live).
    StartSession,
    /// The travel animation of `handle` ran to completion.
    AnimationComplete(TargetHandle),
    /// A tap was hit-tested onto `handle`.
    TapHit(TargetHandle),
    /// The cosmetic highlight delay started by a tap on `handle` elapsed.
    HighlightFinished(TargetHandle),
}

impl GameEvent {
    /// Stable kind name used by middleware keyed on event type.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::StartSession => "StartSession",
            GameEvent::AnimationComplete(_) => "AnimationComplete",
            GameEvent::TapHit(_) => "TapHit",
            GameEvent::HighlightFinished(_) => "HighlightFinished",
        }
    }

    pub fn target(&self) -> Option<TargetHandle> {
        match self {
            GameEvent::StartSession => None,
            GameEvent::AnimationComplete(h)
            | GameEvent::TapHit(h)
            | GameEvent::HighlightFinished(h) => Some(*h),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
}

/// Unified payload type wrapping game + raw input events.
#[derive(Clone)]
pub enum EventPayload {
    Game(GameEvent),
    Input(InputEvent),
}
impl fmt::Debug for EventPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game(g) => write!(f, "Game::{g:?}"),
            Self::Input(i) => write!(f, "Input::{i:?}"),
        }
    }
}

impl EventPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Game(g) => g.kind(),
            Self::Input(_) => "Input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSourceTag {
    System,
    Input,
    Scene,
    Handler,
    Test,
}

/// Envelope adds metadata required for middleware and journaling.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub payload: EventPayload,
    pub source: EventSourceTag,
    pub frame_enqueued: u64,
    pub timestamp_ns: u128,
}

impl EventEnvelope {
    pub fn new(payload: EventPayload, source: EventSourceTag, frame: u64) -> Self {
        let timestamp_ns = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        Self { payload, source, frame_enqueued: frame, timestamp_ns }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventResult { Handled, Ignored, Error(String) }

impl EventResult {
    pub fn is_error(&self) -> bool {
        matches!(self, EventResult::Error(_))
    }
}

pub trait EventHandler: Send + Sync {
    fn handle(&mut self, ev: &GameEvent, world: &mut World) -> EventResult;
    fn name(&self) -> &'static str;
}

/// Registry storing boxed handler trait objects.
#[derive(Resource, Default)]
pub struct HandlerRegistry { handlers: Vec<Box<dyn EventHandler>> }
impl HandlerRegistry {
    pub fn register<H: EventHandler + 'static>(&mut self, h: H) { self.handlers.push(Box::new(h)); }
    pub fn len(&self) -> usize { self.handlers.len() }
    pub fn is_empty(&self) -> bool { self.handlers.is_empty() }
    pub fn dispatch(&mut self, ev: &GameEvent, world: &mut World) -> EventResult {
        let mut any = false;
        for h in self.handlers.iter_mut() {
            match h.handle(ev, world) {
                EventResult::Handled => any = true,
                EventResult::Ignored => {},
                EventResult::Error(msg) => {
                    return EventResult::Error(format!("{}: {msg}", h.name()));
                }
            }
        }
        if any { EventResult::Handled } else { EventResult::Ignored }
    }
}
