//! Timed exit for unattended runs (`window.autoClose`, `--auto-close`).

use bevy::prelude::*;
use game_core::Session;

use crate::core::config::GameConfig;

/// Countdown armed at startup from `window.autoClose`. Absent when that is 0 or negative.
#[derive(Resource, Debug)]
pub struct AutoCloseCountdown {
    timer: Timer,
}

impl AutoCloseCountdown {
    pub fn from_seconds(secs: f32) -> Option<Self> {
        (secs > 0.0 && secs.is_finite()).then(|| Self {
            timer: Timer::from_seconds(secs, TimerMode::Once),
        })
    }

    pub fn remaining_secs(&self) -> f32 {
        self.timer.remaining_secs()
    }
}

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_auto_close).add_systems(
            Update,
            count_down_auto_close.run_if(resource_exists::<AutoCloseCountdown>),
        );
    }
}

fn arm_auto_close(mut commands: Commands, cfg: Res<GameConfig>) {
    if let Some(countdown) = AutoCloseCountdown::from_seconds(cfg.window.auto_close) {
        info!(seconds = cfg.window.auto_close, "auto close armed");
        commands.insert_resource(countdown);
    }
}

/// Exits once the countdown runs out, logging where the session stood.
fn count_down_auto_close(
    mut commands: Commands,
    time: Res<Time>,
    mut countdown: ResMut<AutoCloseCountdown>,
    session: Option<Res<Session>>,
    mut exit: EventWriter<AppExit>,
) {
    if !countdown.timer.tick(time.delta()).just_finished() {
        return;
    }
    match session {
        Some(session) => {
            let st = session.state();
            info!(score = st.score, game_over = st.game_over, "auto close: exiting");
        }
        None => info!("auto close: exiting"),
    }
    exit.write(AppExit::Success);
    commands.remove_resource::<AutoCloseCountdown>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_finite_durations_arm() {
        assert!(AutoCloseCountdown::from_seconds(0.0).is_none());
        assert!(AutoCloseCountdown::from_seconds(-1.0).is_none());
        assert!(AutoCloseCountdown::from_seconds(f32::NAN).is_none());
        let c = AutoCloseCountdown::from_seconds(2.5).expect("armed");
        assert_eq!(c.remaining_secs(), 2.5);
    }
}
