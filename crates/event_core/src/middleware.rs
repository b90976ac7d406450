use crate::{EventEnvelope, EventPayload, GameEvent, InputEvent};
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

/// A stage of the chain every event passes before reaching handlers. Returning `None` drops
/// the event without a journal entry.
pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;
    fn process(&mut self, ev: EventEnvelope) -> Option<EventEnvelope>;
}

/// Middleware in registration order.
#[derive(Resource, Default)]
pub struct MiddlewareChain {
    stages: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn add<M: Middleware + 'static>(&mut self, mw: M) {
        self.stages.push(Box::new(mw));
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run(&mut self, ev: EventEnvelope) -> Option<EventEnvelope> {
        self.stages.iter_mut().try_fold(ev, |cur, mw| mw.process(cur))
    }
}

/// Turns raw key presses into game events. Unbound keys pass through as input, which the
/// reducer journals as ignored.
pub struct KeyMappingMiddleware {
    bindings: HashMap<KeyCode, GameEvent>,
}

impl KeyMappingMiddleware {
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// R, Enter and Space start a new session.
    pub fn with_default_gameplay() -> Self {
        let mut km = Self::empty();
        km.bind(KeyCode::KeyR, GameEvent::StartSession)
            .bind(KeyCode::Enter, GameEvent::StartSession)
            .bind(KeyCode::Space, GameEvent::StartSession);
        km
    }

    pub fn bind(&mut self, key: KeyCode, ev: GameEvent) -> &mut Self {
        self.bindings.insert(key, ev);
        self
    }

    pub fn unbind(&mut self, key: KeyCode) -> &mut Self {
        self.bindings.remove(&key);
        self
    }
}

impl Middleware for KeyMappingMiddleware {
    fn name(&self) -> &'static str {
        "KeyMapping"
    }

    fn process(&mut self, ev: EventEnvelope) -> Option<EventEnvelope> {
        if let EventPayload::Input(InputEvent::KeyDown(code)) = &ev.payload {
            if let Some(game) = self.bindings.get(code) {
                return Some(EventEnvelope { payload: EventPayload::Game(*game), ..ev });
            }
        }
        Some(ev)
    }
}

/// Drops repeats of an event kind arriving within `window_frames` of the last accepted one.
/// When `only` is non-empty, kinds outside that set always pass.
pub struct DebounceMiddleware {
    window_frames: u64,
    only: HashSet<&'static str>,
    last_seen: HashMap<&'static str, u64>,
}

impl DebounceMiddleware {
    pub fn new(window_frames: u64) -> Self {
        Self { window_frames, only: HashSet::new(), last_seen: HashMap::new() }
    }

    pub fn only(mut self, kinds: &[&'static str]) -> Self {
        self.only.extend(kinds.iter().copied());
        self
    }
}

impl Middleware for DebounceMiddleware {
    fn name(&self) -> &'static str {
        "Debounce"
    }

    fn process(&mut self, ev: EventEnvelope) -> Option<EventEnvelope> {
        let kind = ev.payload.kind();
        if !self.only.is_empty() && !self.only.contains(kind) {
            return Some(ev);
        }
        let frame = ev.frame_enqueued;
        if let Some(&last) = self.last_seen.get(kind) {
            if frame.saturating_sub(last) <= self.window_frames {
                return None;
            }
        }
        self.last_seen.insert(kind, frame);
        Some(ev)
    }
}
