use crate::core::config::{rgb, GameConfig};
use bevy::prelude::*;

/// Marker for the camera taps are ray-cast from.
#[derive(Component)]
pub struct GameCamera;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera_and_lights);
    }
}

/// Camera sits at the origin looking down -Z, which is where ships fly toward.
fn setup_camera_and_lights(mut commands: Commands, cfg: Res<GameConfig>) {
    let scene = &cfg.scene;
    commands.insert_resource(ClearColor(rgb(scene.background)));
    commands.insert_resource(AmbientLight {
        color: rgb(scene.ambient_color),
        brightness: scene.ambient_brightness,
        ..default()
    });
    commands.spawn((Name::new("GameCamera"), Camera3d::default(), Transform::IDENTITY, GameCamera));
    commands.spawn((
        Name::new("OmniLight"),
        PointLight {
            intensity: scene.light_intensity,
            range: scene.light_range,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(scene.light_position)),
    ));
}
