//! Collaborator contracts the spawn cycle talks to. Implemented by the Bevy adapter in the
//! application crate and by recording doubles in tests.

use bevy::math::Vec3;
use event_core::TargetHandle;
use thiserror::Error;

/// Where a target appears and which point it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("target table is full ({capacity} live target(s) allowed)")]
    TargetLimit { capacity: usize },
    #[error("missing scene asset `{0}`")]
    MissingAsset(String),
}

/// Rendering / scene-graph side of the game.
///
/// Completion of `animate_move` and `highlight` is not reported through the trait: the
/// implementation enqueues `GameEvent::AnimationComplete` / `GameEvent::HighlightFinished`
/// for the handle once its timer runs out.
pub trait Scene {
    fn spawn_target(&mut self, pose: SpawnPose) -> Result<TargetHandle, SceneError>;
    fn animate_move(&mut self, handle: TargetHandle, to: Vec3, duration: f32);
    fn highlight(&mut self, handle: TargetHandle, delay: f32);
    fn cancel_animations(&mut self, handle: TargetHandle);
    fn remove(&mut self, handle: TargetHandle);
}

/// Receives score updates; never fails.
pub trait ScoreDisplay {
    fn render(&mut self, score: u32);
    fn render_game_over(&mut self, score: u32);
}
