//! Bevy side of the [`Scene`] contract: ship entities, their travel animation and the hit
//! highlight. The spawn cycle only sees handles; entities stay private to this module.

use std::collections::HashMap;

use bevy::prelude::*;
use event_core::{EventFlowSet, EventQueue, EventSourceTag, FrameCounter, GameEvent, TargetHandle};
use game_core::{Scene, SceneError, SpawnPose, TargetTable};

use crate::core::config::{rgb, GameConfig};

/// Deferred scene work recorded while the reducer holds the world.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    Spawn { handle: TargetHandle, pose: SpawnPose },
    Animate { handle: TargetHandle, to: Vec3, duration: f32 },
    Highlight { handle: TargetHandle, delay: f32 },
    Cancel(TargetHandle),
    Remove(TargetHandle),
}

/// [`Scene`] implementation backed by a one-slot target table.
#[derive(Resource, Debug)]
pub struct BevyScene {
    targets: TargetTable<SpawnPose>,
    pending: Vec<SceneCommand>,
}

impl Default for BevyScene {
    fn default() -> Self {
        Self { targets: TargetTable::with_capacity(1), pending: Vec::new() }
    }
}

impl BevyScene {
    pub fn live_targets(&self) -> usize {
        self.targets.len()
    }
    pub fn pending(&self) -> &[SceneCommand] {
        &self.pending
    }
    fn take_pending(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.pending)
    }
}

impl Scene for BevyScene {
    fn spawn_target(&mut self, pose: SpawnPose) -> Result<TargetHandle, SceneError> {
        let handle = self.targets.insert(pose)?;
        self.pending.push(SceneCommand::Spawn { handle, pose });
        Ok(handle)
    }
    fn animate_move(&mut self, handle: TargetHandle, to: Vec3, duration: f32) {
        self.pending.push(SceneCommand::Animate { handle, to, duration });
    }
    fn highlight(&mut self, handle: TargetHandle, delay: f32) {
        self.pending.push(SceneCommand::Highlight { handle, delay });
    }
    fn cancel_animations(&mut self, handle: TargetHandle) {
        self.pending.push(SceneCommand::Cancel(handle));
    }
    fn remove(&mut self, handle: TargetHandle) {
        if self.targets.remove(handle).is_some() {
            self.pending.push(SceneCommand::Remove(handle));
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipTarget(pub TargetHandle);

/// Linear move toward `to`; removed when it completes or is cancelled.
#[derive(Component, Debug, Clone)]
pub struct Travel {
    pub from: Vec3,
    pub to: Vec3,
    pub duration: f32,
    pub elapsed: f32,
}

impl Travel {
    pub fn progress(&self) -> f32 {
        // NaN duration counts as already arrived
        if !(self.duration > 0.0) {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

#[derive(Component, Debug)]
pub struct Highlight(pub Timer);

/// Shared mesh for all ships; each ship gets its own material so highlights stay local.
#[derive(Resource)]
pub struct ShipAssets {
    pub mesh: Handle<Mesh>,
}

/// Handle → (entity, spawn position) for ships currently in the world.
#[derive(Resource, Default, Debug)]
pub struct ShipIndex(pub HashMap<TargetHandle, (Entity, Vec3)>);

pub struct ShipScenePlugin;

impl Plugin for ShipScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BevyScene>()
            .init_resource::<ShipIndex>()
            .add_systems(Startup, setup_ship_assets)
            .add_systems(Update, apply_scene_commands.in_set(EventFlowSet::SceneApply))
            .add_systems(
                Update,
                (advance_travel, advance_highlight).in_set(EventFlowSet::SceneTick),
            );
    }
}

fn setup_ship_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>, cfg: Res<GameConfig>) {
    let [x, y, z] = cfg.scene.ship_size;
    commands.insert_resource(ShipAssets { mesh: meshes.add(Cuboid::new(x, y, z)) });
}

pub fn apply_scene_commands(
    mut commands: Commands,
    mut scene: ResMut<BevyScene>,
    mut index: ResMut<ShipIndex>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<ShipAssets>,
    cfg: Res<GameConfig>,
    ship_materials: Query<&MeshMaterial3d<StandardMaterial>>,
) {
    if scene.pending().is_empty() {
        return;
    }
    for cmd in scene.take_pending() {
        match cmd {
            SceneCommand::Spawn { handle, pose } => {
                let material = materials.add(StandardMaterial {
                    base_color: rgb(cfg.scene.ship_color),
                    ..default()
                });
                let entity = commands
                    .spawn((
                        Name::new(format!("Ship {handle}")),
                        ShipTarget(handle),
                        Mesh3d(assets.mesh.clone()),
                        MeshMaterial3d(material),
                        Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y),
                    ))
                    .id();
                index.0.insert(handle, (entity, pose.position));
            }
            SceneCommand::Animate { handle, to, duration } => {
                let Some(&(entity, from)) = index.0.get(&handle) else { continue };
                commands.entity(entity).insert(Travel { from, to, duration, elapsed: 0.0 });
            }
            SceneCommand::Highlight { handle, delay } => {
                let Some(&(entity, _)) = index.0.get(&handle) else { continue };
                if let Ok(mat) = ship_materials.get(entity) {
                    if let Some(m) = materials.get_mut(&mat.0) {
                        m.emissive = rgb(cfg.scene.highlight_color).to_linear() * 4.0;
                    }
                }
                commands
                    .entity(entity)
                    .insert(Highlight(Timer::from_seconds(delay, TimerMode::Once)));
            }
            SceneCommand::Cancel(handle) => {
                if let Some(&(entity, _)) = index.0.get(&handle) {
                    commands.entity(entity).remove::<Travel>();
                }
            }
            SceneCommand::Remove(handle) => {
                if let Some((entity, _)) = index.0.remove(&handle) {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

pub fn advance_travel(
    mut commands: Commands,
    time: Res<Time>,
    frame: Res<FrameCounter>,
    mut queue: ResMut<EventQueue>,
    mut q: Query<(Entity, &ShipTarget, &mut Transform, &mut Travel)>,
) {
    let dt = time.delta_secs();
    for (entity, ship, mut transform, mut travel) in &mut q {
        travel.elapsed += dt;
        let t = travel.progress();
        transform.translation = travel.from.lerp(travel.to, t);
        if t >= 1.0 {
            commands.entity(entity).remove::<Travel>();
            queue.push_game(GameEvent::AnimationComplete(ship.0), EventSourceTag::Scene, frame.0);
        }
    }
}

pub fn advance_highlight(
    mut commands: Commands,
    time: Res<Time>,
    frame: Res<FrameCounter>,
    mut queue: ResMut<EventQueue>,
    mut q: Query<(Entity, &ShipTarget, &mut Highlight)>,
) {
    for (entity, ship, mut highlight) in &mut q {
        highlight.0.tick(time.delta());
        if highlight.0.finished() {
            commands.entity(entity).remove::<Highlight>();
            queue.push_game(GameEvent::HighlightFinished(ship.0), EventSourceTag::Scene, frame.0);
        }
    }
}
