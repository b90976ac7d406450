#![allow(dead_code)]

use bevy::prelude::*;
use game_core::*;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    Spawn(TargetHandle, SpawnPose),
    Animate(TargetHandle, Vec3, f32),
    Highlight(TargetHandle, f32),
    Cancel(TargetHandle),
    Remove(TargetHandle),
}

#[derive(Debug, Clone)]
pub struct FakeTarget {
    pub pose: SpawnPose,
    pub animating: bool,
}

/// Scene double: keeps live targets in a capacity-one table and logs every call.
#[derive(Resource, Debug)]
pub struct RecordingScene {
    pub targets: TargetTable<FakeTarget>,
    pub calls: Vec<SceneCall>,
    pub max_live: usize,
    pub fail_spawns_after: Option<usize>,
}

impl Default for RecordingScene {
    fn default() -> Self {
        Self { targets: TargetTable::with_capacity(1), calls: Vec::new(), max_live: 0, fail_spawns_after: None }
    }
}

impl RecordingScene {
    pub fn spawns(&self) -> Vec<(TargetHandle, SpawnPose)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SceneCall::Spawn(h, p) => Some((*h, *p)),
                _ => None,
            })
            .collect()
    }

    pub fn animation_durations(&self) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SceneCall::Animate(_, _, d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn removed(&self) -> Vec<TargetHandle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SceneCall::Remove(h) => Some(*h),
                _ => None,
            })
            .collect()
    }
}

impl Scene for RecordingScene {
    fn spawn_target(&mut self, pose: SpawnPose) -> Result<TargetHandle, SceneError> {
        if let Some(limit) = self.fail_spawns_after {
            if self.spawns().len() >= limit {
                return Err(SceneError::MissingAsset("ship".into()));
            }
        }
        let h = self.targets.insert(FakeTarget { pose, animating: false })?;
        self.max_live = self.max_live.max(self.targets.len());
        self.calls.push(SceneCall::Spawn(h, pose));
        Ok(h)
    }
    fn animate_move(&mut self, handle: TargetHandle, to: Vec3, duration: f32) {
        if let Some(t) = self.targets.get_mut(handle) {
            t.animating = true;
        }
        self.calls.push(SceneCall::Animate(handle, to, duration));
    }
    fn highlight(&mut self, handle: TargetHandle, delay: f32) {
        self.calls.push(SceneCall::Highlight(handle, delay));
    }
    fn cancel_animations(&mut self, handle: TargetHandle) {
        if let Some(t) = self.targets.get_mut(handle) {
            t.animating = false;
        }
        self.calls.push(SceneCall::Cancel(handle));
    }
    fn remove(&mut self, handle: TargetHandle) {
        self.targets.remove(handle);
        self.calls.push(SceneCall::Remove(handle));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Score(u32),
    GameOver(u32),
}

#[derive(Resource, Debug, Default)]
pub struct RecordingDisplay {
    pub shown: Vec<Shown>,
}

impl ScoreDisplay for RecordingDisplay {
    fn render(&mut self, score: u32) {
        self.shown.push(Shown::Score(score));
    }
    fn render_game_over(&mut self, score: u32) {
        self.shown.push(Shown::GameOver(score));
    }
}

pub fn seeded_tuning(seed: u64) -> CycleTuning {
    CycleTuning { seed: Some(seed), ..Default::default() }
}

/// Cycle plus its collaborators, driven directly (no Bevy app).
pub struct Rig {
    pub cycle: SpawnCycle,
    pub scene: RecordingScene,
    pub display: RecordingDisplay,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            cycle: SpawnCycle::new(seeded_tuning(7)),
            scene: RecordingScene::default(),
            display: RecordingDisplay::default(),
        }
    }

    pub fn send(&mut self, ev: GameEvent) -> Outcome {
        self.cycle
            .handle_event(&ev, &mut self.scene, &mut self.display)
            .expect("scene never fails here")
    }

    pub fn active(&self) -> TargetHandle {
        self.cycle.state().active_target.expect("a target should be live")
    }

    /// Tap the live target and let its highlight finish.
    pub fn hit(&mut self) -> Outcome {
        let h = self.active();
        assert_eq!(self.send(GameEvent::TapHit(h)), Outcome::Resolving { target: h });
        self.send(GameEvent::HighlightFinished(h))
    }
}


