use event_core::TargetHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No target exists.
    #[default]
    Idle,
    /// A target exists and its travel animation is running.
    InFlight,
    /// A tap landed; highlight then removal is pending. Further taps are ignored.
    Resolving,
}

/// Everything the scoring rules read or write. Owned by [`crate::SpawnCycle`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub score: u32,
    /// Travel time handed to the next spawn, seconds.
    pub duration: f32,
    pub active_target: Option<TargetHandle>,
    pub phase: Phase,
    /// Set by a miss, cleared by the next start.
    pub game_over: bool,
}

impl GameState {
    pub fn new(initial_duration: f32) -> Self {
        Self {
            score: 0,
            duration: initial_duration,
            active_target: None,
            phase: Phase::Idle,
            game_over: false,
        }
    }

    /// `handle` is the live target and nothing has claimed it yet.
    pub fn is_in_flight(&self, handle: TargetHandle) -> bool {
        self.phase == Phase::InFlight && self.active_target == Some(handle)
    }

    pub fn is_resolving(&self, handle: TargetHandle) -> bool {
        self.phase == Phase::Resolving && self.active_target == Some(handle)
    }

    /// active_target is set exactly while a target is in flight or resolving.
    pub fn is_consistent(&self) -> bool {
        matches!(
            (self.phase, self.active_target),
            (Phase::Idle, None) | (Phase::InFlight, Some(_)) | (Phase::Resolving, Some(_))
        )
    }
}
