use bevy::log::{debug, info};
use bevy::math::Vec3;
use event_core::{GameEvent, TargetHandle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::{CycleTuning, GameState, Phase, Scene, SceneError, ScoreDisplay, SpawnPose, SpawnRange};

/// Result of feeding one event into the cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// A session began and its first target is in flight.
    Started { target: TargetHandle },
    /// A tap claimed the target; resolution waits for the highlight.
    Resolving { target: TargetHandle },
    /// The tapped target was removed and `next` replaced it.
    Hit { score: u32, next: TargetHandle },
    /// The target arrived untouched. The session is over.
    Missed { score: u32 },
    /// Stale, premature or otherwise irrelevant event; nothing changed.
    Ignored,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("could not spawn target: {0}")]
    Spawn(#[from] SceneError),
    #[error("spawn requested while {0} is still live")]
    TargetActive(TargetHandle),
}

/// The spawn / score / difficulty state machine.
///
/// Every transition checks the phase *and* compares the event's handle with the active
/// target, so whichever of hit and miss arrives second finds nothing to act on.
pub struct SpawnCycle {
    state: GameState,
    tuning: CycleTuning,
    next_tuning: Option<CycleTuning>,
    rng: StdRng,
}

impl SpawnCycle {
    pub fn new(tuning: CycleTuning) -> Self {
        let rng = match tuning.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { state: GameState::new(tuning.initial_duration), tuning, next_tuning: None, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &CycleTuning {
        &self.tuning
    }

    /// Queue new tuning for the next [`start`](Self::start); the running session keeps its own.
    /// The RNG is kept unless the seed changed.
    pub fn retune(&mut self, tuning: CycleTuning) {
        self.next_tuning = Some(tuning);
    }

    /// Begin a fresh session. A no-op while a target is still live.
    pub fn start(
        &mut self,
        scene: &mut dyn Scene,
        display: &mut dyn ScoreDisplay,
    ) -> Result<Outcome, CycleError> {
        if let Some(live) = self.state.active_target {
            debug!(%live, "start ignored: session in progress");
            return Ok(Outcome::Ignored);
        }
        if let Some(tuning) = self.next_tuning.take() {
            if tuning.seed != self.tuning.seed {
                if let Some(seed) = tuning.seed {
                    self.rng = StdRng::seed_from_u64(seed);
                }
            }
            self.tuning = tuning;
        }
        self.state = GameState::new(self.tuning.initial_duration);
        display.render(self.state.score);
        let target = self.spawn(scene)?;
        info!(%target, duration = self.state.duration, "session started");
        Ok(Outcome::Started { target })
    }

    /// Place a new target and send it toward the origin over the current duration.
    pub fn spawn(&mut self, scene: &mut dyn Scene) -> Result<TargetHandle, CycleError> {
        if let Some(live) = self.state.active_target {
            return Err(CycleError::TargetActive(live));
        }
        let pose = self.sample_pose();
        let handle = scene.spawn_target(pose)?;
        self.state.active_target = Some(handle);
        self.state.phase = Phase::InFlight;
        scene.animate_move(handle, Vec3::ZERO, self.state.duration);
        debug!(%handle, position = ?pose.position, duration = self.state.duration, "spawned");
        Ok(handle)
    }

    pub fn sample_pose(&mut self) -> SpawnPose {
        let x = sample(&mut self.rng, self.tuning.x_range);
        let y = sample(&mut self.rng, self.tuning.y_range);
        let position = Vec3::new(x, y, self.tuning.spawn_z);
        SpawnPose { position, look_at: position * self.tuning.look_at_scale }
    }

    /// Travel animation finished: a miss, unless a tap already claimed the target.
    pub fn on_animation_complete(
        &mut self,
        handle: TargetHandle,
        scene: &mut dyn Scene,
        display: &mut dyn ScoreDisplay,
    ) -> Outcome {
        if !self.state.is_in_flight(handle) {
            debug!(%handle, phase = ?self.state.phase, "completion ignored");
            return Outcome::Ignored;
        }
        scene.remove(handle);
        self.state.active_target = None;
        self.state.phase = Phase::Idle;
        self.state.game_over = true;
        display.render_game_over(self.state.score);
        info!(score = self.state.score, "target reached the camera, game over");
        Outcome::Missed { score: self.state.score }
    }

    /// Hit-tested tap. Only a tap on the in-flight target counts.
    pub fn on_tap(&mut self, handle: TargetHandle, scene: &mut dyn Scene) -> Outcome {
        if !self.state.is_in_flight(handle) {
            debug!(%handle, phase = ?self.state.phase, "tap ignored");
            return Outcome::Ignored;
        }
        self.state.phase = Phase::Resolving;
        scene.highlight(handle, self.tuning.highlight_delay.max(0.0));
        Outcome::Resolving { target: handle }
    }

    /// Highlight done: finish the hit and spawn the next target.
    pub fn on_highlight_finished(
        &mut self,
        handle: TargetHandle,
        scene: &mut dyn Scene,
        display: &mut dyn ScoreDisplay,
    ) -> Result<Outcome, CycleError> {
        if !self.state.is_resolving(handle) {
            debug!(%handle, phase = ?self.state.phase, "highlight completion ignored");
            return Ok(Outcome::Ignored);
        }
        scene.cancel_animations(handle);
        scene.remove(handle);
        self.state.active_target = None;
        self.state.phase = Phase::Idle;
        self.state.score += 1;
        self.state.duration *= self.tuning.speedup;
        display.render(self.state.score);
        info!(score = self.state.score, next_duration = self.state.duration, "hit");
        let next = self.spawn(scene)?;
        Ok(Outcome::Hit { score: self.state.score, next })
    }

    pub fn handle_event(
        &mut self,
        ev: &GameEvent,
        scene: &mut dyn Scene,
        display: &mut dyn ScoreDisplay,
    ) -> Result<Outcome, CycleError> {
        match *ev {
            GameEvent::StartSession => self.start(scene, display),
            GameEvent::AnimationComplete(h) => Ok(self.on_animation_complete(h, scene, display)),
            GameEvent::TapHit(h) => Ok(self.on_tap(h, scene)),
            GameEvent::HighlightFinished(h) => self.on_highlight_finished(h, scene, display),
        }
    }
}

/// Uniform draw from `range`. An empty, NaN or unbounded range pins the coordinate to its
/// finite endpoint (0 if neither is) rather than reaching `gen_range`, which would panic.
fn sample(rng: &mut StdRng, range: SpawnRange) -> f32 {
    let SpawnRange { min, max } = range;
    if min < max && (max - min).is_finite() {
        return rng.gen_range(min..=max);
    }
    [min, max].into_iter().find(|v| v.is_finite()).unwrap_or(0.0)
}
