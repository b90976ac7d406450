use bevy::prelude::*;
use event_core::EventFlowSet;
use game_core::ScoreDisplay;

/// Text model of the score label. Written by the spawn cycle, drawn by [`update_score_label`].
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ScoreBoard {
    pub score: u32,
    pub game_over: bool,
}

impl ScoreBoard {
    pub fn text(&self) -> String {
        if self.game_over {
            format!("You lost!\nYour score: {}\n\nPress R to play again", self.score)
        } else {
            format!("Score: {}", self.score)
        }
    }
}

impl ScoreDisplay for ScoreBoard {
    fn render(&mut self, score: u32) {
        self.score = score;
        self.game_over = false;
    }
    fn render_game_over(&mut self, score: u32) {
        self.score = score;
        self.game_over = true;
    }
}

#[derive(Component)]
pub struct ScoreLabel;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScoreBoard>()
            .add_systems(Startup, spawn_score_label)
            .add_systems(Update, update_score_label.in_set(EventFlowSet::UIUpdate));
    }
}

fn spawn_score_label(mut commands: Commands, board: Res<ScoreBoard>) {
    commands.spawn((
        Name::new("ScoreLabel"),
        Text::new(board.text()),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
        ScoreLabel,
    ));
}

pub fn update_score_label(board: Res<ScoreBoard>, mut q: Query<&mut Text, With<ScoreLabel>>) {
    if !board.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = board.text();
    }
}
