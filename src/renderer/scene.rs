//! Draw-list generation
//!
//! Turns a `GameState` into a flat list of draw commands. Backends only
//! execute the list, so everything here is testable without a canvas.

use glam::Vec2;

use crate::consts::*;
use crate::highscores::HighScores;
use crate::platform::assets::{fruit_image, half_fruit_image};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Rect, Theme, professor_rect, theme_button};

pub const WHITE: &str = "#FFFFFF";
pub const GREEN: &str = "#00FF00";
pub const BLUE: &str = "#0000FF";
pub const TRAIL_COLOR: &str = "rgba(255, 255, 255, 0.5)";

/// Leaderboard rows shown on the title screens
const BOARD_ROWS: usize = 5;

/// Lives icons, left to right
const LIVES_X: [f32; 3] = [690.0, 725.0, 760.0];
const LIVES_ICON: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Background(Theme),
    FillRect {
        rect: Rect,
        color: &'static str,
    },
    Image {
        name: String,
        rect: Rect,
    },
    Text {
        text: String,
        size: f32,
        pos: Vec2,
        align: Align,
        color: &'static str,
    },
    Polyline {
        points: Vec<Vec2>,
        color: &'static str,
        width: f32,
    },
}

/// One frame's worth of draw commands, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub cmds: Vec<DrawCmd>,
}

impl Scene {
    fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    fn text(&mut self, text: impl Into<String>, size: f32, pos: Vec2, align: Align) {
        self.push(DrawCmd::Text {
            text: text.into(),
            size,
            pos,
            align,
            color: WHITE,
        });
    }

    fn image(&mut self, name: impl Into<String>, rect: Rect) {
        self.push(DrawCmd::Image {
            name: name.into(),
            rect,
        });
    }

    /// All text in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Image { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Build the frame for the current phase
pub fn build_scene(state: &GameState, settings: &Settings, board: &HighScores) -> Scene {
    let mut scene = Scene::default();
    match state.phase {
        GamePhase::Loading => {
            let msg = state.load_error.as_deref().unwrap_or("Loading...");
            scene.text(msg, 24.0, Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), Align::Center);
        }
        GamePhase::ThemeSelect => theme_screen(&mut scene, state),
        GamePhase::Menu | GamePhase::GameOver => title_screen(&mut scene, state, board),
        GamePhase::Playing => play_screen(&mut scene, state, settings),
    }
    scene
}

fn theme_screen(scene: &mut Scene, state: &GameState) {
    scene.push(DrawCmd::Background(state.theme));
    scene.text("FRUIT SLASH!", 70.0, Vec2::new(WIDTH / 2.0, HEIGHT / 5.0), Align::Center);
    scene.text("Select a Theme", 35.0, Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 - 45.0), Align::Center);

    for (theme, color) in [(Theme::Summer, GREEN), (Theme::Winter, BLUE)] {
        let rect = theme_button(theme);
        scene.push(DrawCmd::FillRect { rect, color });
        scene.text(theme.as_str(), 20.0, rect.center(), Align::Center);
    }

    scene.image("professor.png", professor_rect());
    fact_line(scene, state);
}

fn title_screen(scene: &mut Scene, state: &GameState, board: &HighScores) {
    scene.push(DrawCmd::Background(state.theme));
    scene.text("FRUIT SLASH!", 70.0, Vec2::new(WIDTH / 2.0, HEIGHT / 4.0), Align::Center);
    if state.phase == GamePhase::GameOver {
        let score = state.session.score;
        let label = if score > 0 && board.top_score() == Some(score) {
            format!("New best! Score : {score}")
        } else {
            format!("Score : {score}")
        };
        scene.text(label, 35.0, Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), Align::Center);
    }
    leaderboard(scene, board);
    scene.text(
        "Press Enter or Click to begin!",
        35.0,
        Vec2::new(WIDTH / 2.0, HEIGHT * 3.0 / 4.0),
        Align::Center,
    );
}

fn leaderboard(scene: &mut Scene, board: &HighScores) {
    if board.is_empty() {
        return;
    }
    let x = WIDTH - 20.0;
    scene.text("High scores", 18.0, Vec2::new(x, 30.0), Align::Right);
    for (i, entry) in board.entries.iter().take(BOARD_ROWS).enumerate() {
        scene.text(
            format!("{}. {} ({})", i + 1, entry.score, entry.theme.as_str()),
            16.0,
            Vec2::new(x, 55.0 + i as f32 * 20.0),
            Align::Right,
        );
    }
}

fn play_screen(scene: &mut Scene, state: &GameState, settings: &Settings) {
    let session = &state.session;
    scene.push(DrawCmd::Background(state.theme));

    let time = format!("Time: {}", session.remaining_secs());
    scene.text(time, 27.0, Vec2::new(10.0, 50.0), Align::Left);
    scene.text(format!("Score : {}", session.score), 42.0, Vec2::new(0.0, 20.0), Align::Left);

    for x in LIVES_X.iter().take(session.lives as usize) {
        scene.image("images/white_lives.png", Rect::new(*x, 5.0, LIVES_ICON, LIVES_ICON));
    }
    for x in LIVES_X.iter().take(session.lives_lost() as usize) {
        scene.image("images/red_lives.png", Rect::new(*x, 15.0, LIVES_ICON, LIVES_ICON));
    }

    scene.text(
        format!("Difficulty: {}", session.difficulty_label().as_str()),
        16.0,
        Vec2::new(WIDTH - 10.0, HEIGHT - 10.0),
        Align::Right,
    );

    for fruit in state.fruits.iter().filter(|f| f.launched) {
        let on_screen = fruit.pos.y > -FRUIT_SIZE
            && fruit.pos.y < HEIGHT + FRUIT_SIZE
            && fruit.pos.x > -FRUIT_SIZE
            && fruit.pos.x < WIDTH + FRUIT_SIZE;
        if !on_screen {
            continue;
        }
        let name = if fruit.sliced {
            half_fruit_image(fruit.kind).unwrap_or_else(|| "images/explosion.png".to_string())
        } else {
            fruit_image(fruit.kind)
        };
        scene.image(name, fruit.hit_box());
    }

    if settings.show_trail && state.pointer.pressed && state.trail.len() > 1 {
        scene.push(DrawCmd::Polyline {
            points: state.trail.points().collect(),
            color: TRAIL_COLOR,
            width: 3.0,
        });
    }

    fact_line(scene, state);
}

fn fact_line(scene: &mut Scene, state: &GameState) {
    if let Some(fact) = &state.facts.active {
        scene.text(fact.text(), 14.0, Vec2::new(fact.x, HEIGHT / 2.0 + 50.0), Align::Left);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EndReason, FruitKind, InputEvent, handle_input};

    #[test]
    fn test_loading_shows_error() {
        let mut state = GameState::new(1);
        state.finish_loading(Err(anyhow::anyhow!("boom")));
        let scene = build_scene(&state, &Settings::default(), &HighScores::new());
        assert!(scene.texts().any(|t| t.contains("boom")));
    }

    #[test]
    fn test_theme_screen_has_buttons_and_professor() {
        let mut state = GameState::new(1);
        state.finish_loading(Ok(()));
        let scene = build_scene(&state, &Settings::default(), &HighScores::new());
        let texts: Vec<&str> = scene.texts().collect();
        assert!(texts.contains(&"Summer"));
        assert!(texts.contains(&"Winter"));
        assert!(scene.images().any(|i| i == "professor.png"));
    }

    #[test]
    fn test_hud_counts_lives() {
        let mut state = GameState::new(1);
        state.finish_loading(Ok(()));
        state.start_session(0.0);
        state.session.lives = 2;
        let scene = build_scene(&state, &Settings::default(), &HighScores::new());
        assert_eq!(scene.images().filter(|i| *i == "images/white_lives.png").count(), 2);
        assert_eq!(scene.images().filter(|i| *i == "images/red_lives.png").count(), 1);
        assert!(scene.texts().any(|t| t == "Time: 60"));
        assert!(scene.texts().any(|t| t == "Difficulty: Easy"));
    }

    #[test]
    fn test_sliced_bomb_draws_explosion() {
        let mut state = GameState::new(1);
        state.finish_loading(Ok(()));
        state.start_session(0.0);
        let bomb = state.fruits.get_mut(FruitKind::Bomb);
        bomb.launched = true;
        bomb.sliced = true;
        bomb.pos = Vec2::new(300.0, 200.0);
        let scene = build_scene(&state, &Settings::default(), &HighScores::new());
        assert!(scene.images().any(|i| i == "images/explosion.png"));
    }

    #[test]
    fn test_trail_drawn_only_when_enabled() {
        let mut state = GameState::new(1);
        state.finish_loading(Ok(()));
        state.start_session(0.0);
        for fruit in state.fruits.iter_mut() {
            fruit.launched = false;
        }
        handle_input(&mut state, InputEvent::PointerDown(Vec2::new(10.0, 10.0)), 0.0);
        handle_input(&mut state, InputEvent::PointerMove(Vec2::new(20.0, 10.0)), 0.0);
        handle_input(&mut state, InputEvent::PointerMove(Vec2::new(30.0, 10.0)), 0.0);

        let has_trail = |scene: &Scene| {
            scene.cmds.iter().any(|c| matches!(c, DrawCmd::Polyline { .. }))
        };
        assert!(has_trail(&build_scene(&state, &Settings::default(), &HighScores::new())));
        let settings = Settings {
            show_trail: false,
            ..Settings::default()
        };
        assert!(!has_trail(&build_scene(&state, &settings, &HighScores::new())));
    }

    #[test]
    fn test_title_screens_show_the_board() {
        let mut state = GameState::new(1);
        state.finish_loading(Ok(()));
        state.set_phase(GamePhase::Menu);
        let empty = build_scene(&state, &Settings::default(), &HighScores::new());
        assert!(!empty.texts().any(|t| t == "High scores"));

        let mut board = HighScores::new();
        for score in 1..=7 {
            board.add_score(score, Theme::Winter, 0.0);
        }
        let scene = build_scene(&state, &Settings::default(), &board);
        assert!(scene.texts().any(|t| t == "1. 7 (Winter)"));
        assert!(scene.texts().any(|t| t == "5. 3 (Winter)"));
        assert!(!scene.texts().any(|t| t.starts_with("6. ")));
    }

    #[test]
    fn test_game_over_marks_a_new_best() {
        let mut state = GameState::new(1);
        state.finish_loading(Ok(()));
        state.start_session(0.0);
        state.session.score = 12;
        state.end_session(EndReason::TimeUp);

        let mut board = HighScores::new();
        board.add_score(12, Theme::Summer, 0.0);
        let scene = build_scene(&state, &Settings::default(), &board);
        assert!(scene.texts().any(|t| t == "New best! Score : 12"));

        board.add_score(30, Theme::Summer, 1.0);
        let scene = build_scene(&state, &Settings::default(), &board);
        assert!(scene.texts().any(|t| t == "Score : 12"));
    }
}
