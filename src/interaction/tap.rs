use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use event_core::{EventEnvelope, EventFlowSet, EventPayload, EventQueue, EventSourceTag, FrameCounter, GameEvent, InputEvent, TargetHandle};

use crate::core::config::GameConfig;
use crate::rendering::camera::GameCamera;
use crate::rendering::ship::ShipTarget;

pub struct TapPlugin;

impl Plugin for TapPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_tap, forward_keys).in_set(EventFlowSet::InputCollect),
        );
    }
}

/// Widest angle between a tap ray and the direction to a ship that still counts as a hit.
/// Keeps a ship right in front of the camera from claiming taps anywhere on screen.
pub const MAX_PICK_ANGLE: f32 = 0.6;

/// Pick distance for a ship at `center` with tolerance sphere `radius`, seen along the
/// unit-length `dir` from `origin`.
///
/// The ray must point into the cone the sphere subtends from `origin`, capped at
/// [`MAX_PICK_ANGLE`]. From outside the sphere this is the same as the ray crossing it.
pub fn ray_pick_distance(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let dist = to_center.length();
    if dist <= f32::EPSILON {
        return None;
    }
    let half_angle = if dist > radius { (radius / dist).asin() } else { std::f32::consts::FRAC_PI_2 };
    let cos_limit = half_angle.min(MAX_PICK_ANGLE).cos();
    if to_center.dot(dir) / dist < cos_limit {
        return None;
    }
    Some((dist - radius).max(0.0))
}

/// Nearest target whose pick cone the ray falls in.
pub fn pick_target<I>(ray: Ray3d, targets: I, radius: f32) -> Option<TargetHandle>
where
    I: IntoIterator<Item = (TargetHandle, Vec3)>,
{
    targets
        .into_iter()
        .filter_map(|(h, center)| ray_pick_distance(ray.origin, *ray.direction, center, radius).map(|d| (h, d)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| h)
}

/// Ships as seen by picking. Reads `Transform`: ships are root entities moved in
/// `EventFlowSet::SceneTick`, and a ship spawned this frame has no propagated `GlobalTransform` yet.
pub type ShipPickQuery<'w, 's> = Query<'w, 's, (&'static ShipTarget, &'static Transform)>;

pub fn pick_ship(ray: Ray3d, ships: &ShipPickQuery, radius: f32) -> Option<TargetHandle> {
    pick_target(ray, ships.iter().map(|(ship, tf)| (ship.0, tf.translation)), radius)
}

/// Screen position of a tap that started this frame: first new touch, else a left click.
fn tap_position(window: &Window, touches: &Touches, buttons: &ButtonInput<MouseButton>) -> Option<Vec2> {
    if let Some(touch) = touches.iter_just_pressed().next() {
        return Some(touch.position());
    }
    if buttons.just_pressed(MouseButton::Left) {
        return window.cursor_position();
    }
    None
}

fn handle_tap(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<GameCamera>>,
    ships: ShipPickQuery,
    cfg: Res<GameConfig>,
    frame: Res<FrameCounter>,
    mut queue: ResMut<EventQueue>,
) {
    let Ok(window) = windows.single() else { return };
    let Some(screen_pos) = tap_position(window, &touches, &buttons) else { return };
    let Ok((camera, cam_tf)) = camera_q.single() else { return };
    let Ok(ray) = camera.viewport_to_world(cam_tf, screen_pos) else { return };
    match pick_ship(ray, &ships, cfg.scene.pick_radius) {
        Some(handle) => {
            debug!(%handle, ?screen_pos, "tap hit");
            queue.push_game(GameEvent::TapHit(handle), EventSourceTag::Input, frame.0);
        }
        None => trace!(?screen_pos, "tap hit nothing"),
    }
}

/// Raw keys go through the middleware chain, which maps restart keys.
fn forward_keys(
    keys: Res<ButtonInput<KeyCode>>,
    frame: Res<FrameCounter>,
    mut queue: ResMut<EventQueue>,
) {
    for key in keys.get_just_pressed() {
        queue.push(EventEnvelope::new(
            EventPayload::Input(InputEvent::KeyDown(*key)),
            EventSourceTag::Input,
            frame.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, dir: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(dir).unwrap())
    }

    #[test]
    fn ray_through_center_hits_at_near_surface() {
        let d = ray_pick_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -10.0), 2.0).unwrap();
        assert!((d - 8.0).abs() < 1e-5);
    }

    #[test]
    fn ray_pointing_away_misses() {
        assert!(ray_pick_distance(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -10.0), 2.0).is_none());
    }

    #[test]
    fn ray_passing_beside_misses() {
        assert!(ray_pick_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(5.0, 0.0, -10.0), 2.0).is_none());
    }

    #[test]
    fn ray_grazing_the_sphere_hits() {
        // tangent angle is asin(2/10); aim just inside it
        let dir = Vec3::new(0.19, 0.0, -1.0).normalize();
        assert!(ray_pick_distance(Vec3::ZERO, dir, Vec3::new(0.0, 0.0, -10.0), 2.0).is_some());
    }

    #[test]
    fn close_ship_only_takes_taps_aimed_at_it() {
        let ship = Vec3::new(0.0, 0.0, -3.0);
        assert!(ray_pick_distance(Vec3::ZERO, Vec3::NEG_Z, ship, 6.0).is_some());
        assert!(ray_pick_distance(Vec3::ZERO, Vec3::Z, ship, 6.0).is_none());
        assert!(ray_pick_distance(Vec3::ZERO, Vec3::Y, ship, 6.0).is_none());
        let off_axis = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert!(ray_pick_distance(Vec3::ZERO, off_axis, ship, 6.0).is_none());
    }

    #[test]
    fn ship_at_the_camera_is_not_pickable() {
        assert!(ray_pick_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::ZERO, 6.0).is_none());
    }

    #[test]
    fn pick_prefers_nearest() {
        let far = TargetHandle::new(0, 0);
        let near = TargetHandle::new(1, 0);
        let targets = [
            (far, Vec3::new(0.0, 0.0, -100.0)),
            (near, Vec3::new(0.5, 0.0, -20.0)),
        ];
        assert_eq!(pick_target(ray(Vec3::ZERO, Vec3::NEG_Z), targets, 3.0), Some(near));
    }

    #[test]
    fn pick_nothing_when_empty() {
        assert_eq!(pick_target(ray(Vec3::ZERO, Vec3::NEG_Z), Vec::<(TargetHandle, Vec3)>::new(), 3.0), None);
    }
}
