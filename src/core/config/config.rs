use bevy::prelude::*;
use game_core::CycleTuning;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 1280.0,
            title: "Ship Tapper".into(),
            auto_close: 0.0,
        }
    }
}

/// Presentation parameters: lights, ship look, tap tolerance. None of these affect scoring.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub background: [f32; 3],
    pub light_position: [f32; 3],
    pub light_intensity: f32,
    pub light_range: f32,
    pub ambient_color: [f32; 3],
    pub ambient_brightness: f32,
    /// Ship box extents (x, y, z); z is the nose-to-tail length.
    pub ship_size: [f32; 3],
    pub ship_color: [f32; 3],
    pub highlight_color: [f32; 3],
    /// Radius of the sphere a tap ray must cross to hit a ship.
    pub pick_radius: f32,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
            light_position: [0.0, 10.0, 10.0],
            light_intensity: 40_000_000.0,
            light_range: 250.0,
            ambient_color: [0.33, 0.33, 0.33],
            ambient_brightness: 400.0,
            ship_size: [6.0, 1.5, 9.0],
            ship_color: [0.75, 0.78, 0.82],
            highlight_color: [1.0, 0.0, 0.0],
            pick_radius: 6.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EventConfig {
    pub journal_capacity: usize,
    /// Repeated restart requests within this many frames collapse into one.
    pub restart_debounce_frames: u64,
    /// Seconds between journal summaries in debug builds; 0 disables.
    pub log_interval: f32,
}
impl Default for EventConfig {
    fn default() -> Self {
        Self { journal_capacity: 512, restart_debounce_frames: 15, log_interval: 5.0 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub cycle: CycleTuning,
    pub scene: SceneConfig,
    pub events: EventConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Later files override earlier ones key by key. Unreadable files are reported and skipped.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                        if let Some(ev) = existing {
                            merge_value(ev, v);
                        } else {
                            bm.insert(k, v);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!("failed to deserialize merged config; using defaults: {e}"));
                (GameConfig::default(), used, errors)
            }
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        w.extend(self.cycle.validate());
        if self.scene.pick_radius <= 0.0 {
            w.push(format!(
                "scene.pick_radius {} must be > 0; taps can never hit",
                self.scene.pick_radius
            ));
        }
        if self.scene.ship_size.iter().any(|s| *s <= 0.0) {
            w.push(format!("scene.ship_size {:?} has non-positive extents", self.scene.ship_size));
        }
        let light = Vec3::from_array(self.scene.light_position);
        let far = Vec3::new(0.0, 0.0, self.cycle.spawn_z);
        if light.distance(far) > self.scene.light_range {
            w.push(format!(
                "scene.light_range {} does not reach spawn depth {}; ships are lit by ambient only",
                self.scene.light_range, self.cycle.spawn_z
            ));
        }
        if self.events.journal_capacity == 0 {
            w.push("events.journal_capacity 0 disables fatal-error detection".into());
        }
        w
    }
}

pub fn rgb(c: [f32; 3]) -> Color {
    Color::srgb(c[0], c[1], c[2])
}
