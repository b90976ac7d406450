use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn symmetric(half: f32) -> Self {
        Self { min: -half, max: half }
    }
    pub fn contains(&self, v: f32) -> bool {
        (self.min..=self.max).contains(&v)
    }
}

impl Default for SpawnRange {
    fn default() -> Self {
        Self::symmetric(25.0)
    }
}

/// Timing and placement parameters of the spawn cycle.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CycleTuning {
    /// Travel time of the first target, seconds.
    pub initial_duration: f32,
    /// Factor applied to the travel time after every hit.
    pub speedup: f32,
    pub x_range: SpawnRange,
    pub y_range: SpawnRange,
    pub spawn_z: f32,
    /// Look-at point = spawn position * `look_at_scale`. Presentation only.
    pub look_at_scale: f32,
    /// Cosmetic highlight time between a tap and its resolution, seconds.
    pub highlight_delay: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for CycleTuning {
    fn default() -> Self {
        Self {
            initial_duration: 5.0,
            speedup: 0.9,
            x_range: SpawnRange::symmetric(25.0),
            y_range: SpawnRange::symmetric(25.0),
            spawn_z: -105.0,
            look_at_scale: 2.0,
            highlight_delay: 0.25,
            seed: None,
        }
    }
}

impl CycleTuning {
    /// Travel time after `hits` consecutive hits.
    pub fn duration_after(&self, hits: u32) -> f32 {
        self.initial_duration * self.speedup.powi(hits as i32)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if !self.initial_duration.is_finite() || self.initial_duration <= 0.0 {
            w.push(format!("cycle.initial_duration {} must be > 0", self.initial_duration));
        }
        if !(self.speedup > 0.0 && self.speedup < 1.0) {
            w.push(format!(
                "cycle.speedup {} outside (0, 1); targets will not get faster",
                self.speedup
            ));
        }
        for (name, r) in [("x_range", self.x_range), ("y_range", self.y_range)] {
            if !r.min.is_finite() || !r.max.is_finite() || !(r.max - r.min).is_finite() {
                w.push(format!(
                    "cycle.{name} ({}, {}) is not finite; the coordinate is pinned to a finite endpoint",
                    r.min, r.max
                ));
            } else if r.min > r.max {
                w.push(format!("cycle.{name} min {} > max {}", r.min, r.max));
            }
        }
        if !self.spawn_z.is_finite() || self.spawn_z >= 0.0 {
            w.push(format!(
                "cycle.spawn_z {} is not in front of the camera (expected negative)",
                self.spawn_z
            ));
        }
        if !self.look_at_scale.is_finite() {
            w.push(format!("cycle.look_at_scale {} must be finite", self.look_at_scale));
        }
        if self.highlight_delay < 0.0 {
            w.push(format!("cycle.highlight_delay {} negative -> treated as 0", self.highlight_delay));
        }
        w
    }
}
