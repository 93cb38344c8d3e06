//! Input events and per-phase dispatch
//!
//! Input handlers run to completion between ticks. Outside `Playing` every
//! event is navigation; during `Playing` a press slices and held moves
//! extend the trail.

use glam::Vec2;

use super::collision::{SliceReport, slice_pass};
use super::geometry::Rect;
use super::state::{GamePhase, GameState, Theme};
use crate::consts::*;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// A discrete input event, in play-area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    PointerLeave,
    /// First touch point, if the event carried one
    TouchStart(Option<Vec2>),
    TouchMove(Option<Vec2>),
    TouchEnd,
    Key(Key),
}

/// Button size on the theme screen
pub const THEME_BUTTON_SIZE: Vec2 = Vec2::new(150.0, 55.0);
/// Professor figure on the theme screen
pub const PROFESSOR_SIZE: Vec2 = Vec2::new(160.0, 220.0);

/// Clickable region of a theme button
pub fn theme_button(theme: Theme) -> Rect {
    let center_x = match theme {
        Theme::Summer => WIDTH / 4.0,
        Theme::Winter => 3.0 * WIDTH / 4.0,
    };
    Rect::new(
        center_x - THEME_BUTTON_SIZE.x / 2.0,
        HEIGHT / 2.0 - THEME_BUTTON_SIZE.y / 2.0,
        THEME_BUTTON_SIZE.x,
        THEME_BUTTON_SIZE.y,
    )
}

/// Clickable region of the professor
pub fn professor_rect() -> Rect {
    Rect::new(
        20.0,
        HEIGHT / 2.0 - PROFESSOR_SIZE.y / 2.0,
        PROFESSOR_SIZE.x,
        PROFESSOR_SIZE.y,
    )
}

/// Apply one input event; returns what slicing it caused, if any
pub fn handle_input(state: &mut GameState, event: InputEvent, now_ms: f64) -> SliceReport {
    match event {
        InputEvent::PointerDown(pos) => press(state, pos, now_ms),
        InputEvent::TouchStart(Some(pos)) => {
            // Touch has no hover, so the press point starts the trail
            if state.is_playing() {
                state.trail.clear();
                state.trail.push(pos);
            }
            press(state, pos, now_ms)
        }
        InputEvent::PointerMove(pos) | InputEvent::TouchMove(Some(pos)) => drag(state, pos),
        InputEvent::TouchStart(None) | InputEvent::TouchMove(None) => {
            log::warn!("Touch event without a touch point ignored");
            SliceReport::default()
        }
        InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
            state.pointer.pressed = false;
            state.trail.clear();
            SliceReport::default()
        }
        InputEvent::Key(Key::Enter) => {
            if state.phase == GamePhase::Menu {
                state.start_session(now_ms);
            }
            SliceReport::default()
        }
        InputEvent::Key(Key::Other) => SliceReport::default(),
    }
}

fn press(state: &mut GameState, pos: Vec2, now_ms: f64) -> SliceReport {
    state.pointer.pos = pos;
    state.pointer.pressed = true;
    click(state, pos, now_ms)
}

/// Moves only record; hit tests run on press
fn drag(state: &mut GameState, pos: Vec2) -> SliceReport {
    state.pointer.pos = pos;
    if state.is_playing() && state.pointer.pressed {
        state.trail.push(pos);
    }
    SliceReport::default()
}

/// A click, interpreted by phase
fn click(state: &mut GameState, pos: Vec2, now_ms: f64) -> SliceReport {
    match state.phase {
        GamePhase::Loading => {}
        GamePhase::ThemeSelect => {
            if let Some(theme) = [Theme::Summer, Theme::Winter]
                .into_iter()
                .find(|t| theme_button(*t).contains_inclusive(pos))
            {
                log::info!("Theme selected: {}", theme.as_str());
                state.theme = theme;
                state.start_session(now_ms);
            } else if professor_rect().contains_inclusive(pos) {
                let fact = state.facts.request(&mut state.rng, now_ms);
                log::debug!("Fact {} this round: {fact}", state.facts.shown_count());
            }
        }
        GamePhase::Menu => state.start_session(now_ms),
        GamePhase::Playing => return slice_pass(state),
        GamePhase::GameOver => state.set_phase(GamePhase::Menu),
    }
    SliceReport::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fruit::{Fruit, FruitKind};
    use crate::sim::state::EndReason;

    fn ready_state() -> GameState {
        let mut state = GameState::new(2024);
        state.finish_loading(Ok(()));
        state
    }

    fn place(state: &mut GameState, kind: FruitKind, pos: Vec2) {
        let fruit = state.fruits.get_mut(kind);
        fruit.pos = pos;
        fruit.launched = true;
        fruit.sliced = false;
    }

    fn park_all(state: &mut GameState) {
        for fruit in state.fruits.iter_mut() {
            fruit.launched = false;
        }
    }

    #[test]
    fn test_theme_buttons_start_a_session() {
        let mut state = ready_state();
        // Miss both buttons: nothing happens
        handle_input(&mut state, InputEvent::PointerDown(Vec2::new(400.0, 50.0)), 0.0);
        assert_eq!(state.phase, GamePhase::ThemeSelect);

        let winter = theme_button(Theme::Winter).center();
        handle_input(&mut state, InputEvent::PointerDown(winter), 1234.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.theme, Theme::Winter);
        assert_eq!(state.session.start_ms, 1234.0);
    }

    #[test]
    fn test_theme_button_edges_are_inclusive() {
        let mut state = ready_state();
        let summer = theme_button(Theme::Summer);
        handle_input(&mut state, InputEvent::PointerDown(summer.min), 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.theme, Theme::Summer);
    }

    #[test]
    fn test_professor_shows_fact() {
        let mut state = ready_state();
        handle_input(
            &mut state,
            InputEvent::PointerDown(professor_rect().center()),
            500.0,
        );
        assert_eq!(state.phase, GamePhase::ThemeSelect);
        assert!(state.facts.active.is_some());
    }

    #[test]
    fn test_menu_starts_on_click_or_enter() {
        let mut state = ready_state();
        state.set_phase(GamePhase::Menu);
        handle_input(&mut state, InputEvent::Key(Key::Other), 0.0);
        assert_eq!(state.phase, GamePhase::Menu);
        handle_input(&mut state, InputEvent::Key(Key::Enter), 0.0);
        assert_eq!(state.phase, GamePhase::Playing);

        state.set_phase(GamePhase::Menu);
        handle_input(&mut state, InputEvent::PointerDown(Vec2::new(5.0, 5.0)), 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_enter_ignored_outside_menu() {
        let mut state = ready_state();
        handle_input(&mut state, InputEvent::Key(Key::Enter), 0.0);
        assert_eq!(state.phase, GamePhase::ThemeSelect);

        state.start_session(0.0);
        state.end_session(EndReason::TimeUp);
        handle_input(&mut state, InputEvent::Key(Key::Enter), 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_click_returns_to_menu() {
        let mut state = ready_state();
        state.start_session(0.0);
        state.end_session(EndReason::TimeUp);
        handle_input(&mut state, InputEvent::PointerDown(Vec2::new(1.0, 1.0)), 0.0);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_press_on_fresh_fruit_scores() {
        let mut state = ready_state();
        state.set_phase(GamePhase::Menu);
        handle_input(&mut state, InputEvent::Key(Key::Enter), 0.0);
        park_all(&mut state);

        // A just-launched melon, still at its spawn point
        let mut melon = state.fruits.get(FruitKind::Melon).clone();
        melon.launched = true;
        let spawn = melon.pos;
        *state.fruits.get_mut(FruitKind::Melon) = melon;

        let report = handle_input(
            &mut state,
            InputEvent::PointerDown(spawn + Vec2::splat(FRUIT_SIZE / 2.0)),
            10.0,
        );
        assert_eq!(report.sliced, vec![FruitKind::Melon]);
        assert_eq!(state.session.score, 1);
        assert_eq!(state.session.lives, STARTING_LIVES);
        assert!(state.fruits.get(FruitKind::Melon).sliced);
    }

    #[test]
    fn test_three_bombs_end_the_session_on_the_third() {
        let mut state = ready_state();
        state.set_phase(GamePhase::Menu);
        handle_input(&mut state, InputEvent::Key(Key::Enter), 0.0);
        park_all(&mut state);
        assert_eq!(state.session.lives, 3);

        let bomb_at = Vec2::new(300.0, 200.0);
        let press_at = bomb_at + Vec2::splat(30.0);
        for expected_lives in [2u8, 1, 0] {
            place(&mut state, FruitKind::Bomb, bomb_at);
            handle_input(&mut state, InputEvent::PointerDown(press_at), 0.0);
            handle_input(&mut state, InputEvent::PointerUp, 0.0);
            assert_eq!(state.session.lives, expected_lives);
            if expected_lives > 0 {
                assert_eq!(state.phase, GamePhase::Playing);
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.session.end_reason, Some(EndReason::OutOfLives));
    }

    #[test]
    fn test_held_move_into_bomb_does_not_slice() {
        let mut state = ready_state();
        state.start_session(0.0);
        park_all(&mut state);
        place(&mut state, FruitKind::Bomb, Vec2::new(300.0, 200.0));

        handle_input(&mut state, InputEvent::PointerDown(Vec2::new(700.0, 50.0)), 0.0);
        let report =
            handle_input(&mut state, InputEvent::PointerMove(Vec2::new(330.0, 230.0)), 0.0);
        assert_eq!(report, SliceReport::default());
        assert_eq!(state.session.lives, STARTING_LIVES);
        assert!(!state.fruits.get(FruitKind::Bomb).sliced);
        assert_eq!(state.trail.len(), 1);
        assert_eq!(state.pointer.pos, Vec2::new(330.0, 230.0));
    }

    #[test]
    fn test_held_swipe_across_fruit_does_not_score() {
        let mut state = ready_state();
        state.start_session(0.0);
        park_all(&mut state);
        place(&mut state, FruitKind::Orange, Vec2::new(300.0, 200.0));

        handle_input(&mut state, InputEvent::PointerDown(Vec2::new(100.0, 235.0)), 0.0);
        handle_input(&mut state, InputEvent::PointerMove(Vec2::new(200.0, 235.0)), 0.0);
        handle_input(&mut state, InputEvent::PointerMove(Vec2::new(450.0, 235.0)), 0.0);
        assert_eq!(state.trail.len(), 2);
        assert_eq!(state.session.score, 0);
        assert!(!state.fruits.get(FruitKind::Orange).sliced);
    }

    #[test]
    fn test_moves_without_press_do_not_record() {
        let mut state = ready_state();
        state.start_session(0.0);
        handle_input(&mut state, InputEvent::PointerMove(Vec2::new(10.0, 10.0)), 0.0);
        handle_input(&mut state, InputEvent::PointerMove(Vec2::new(20.0, 10.0)), 0.0);
        assert!(state.trail.is_empty());
        assert_eq!(state.pointer.pos, Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_release_and_leave_clear_trail() {
        let mut state = ready_state();
        state.start_session(0.0);
        park_all(&mut state);
        handle_input(&mut state, InputEvent::PointerDown(Vec2::new(10.0, 10.0)), 0.0);
        handle_input(&mut state, InputEvent::PointerMove(Vec2::new(20.0, 10.0)), 0.0);
        handle_input(&mut state, InputEvent::PointerMove(Vec2::new(30.0, 10.0)), 0.0);
        assert_eq!(state.trail.len(), 2);
        handle_input(&mut state, InputEvent::PointerLeave, 0.0);
        assert!(state.trail.is_empty());
        assert!(!state.pointer.pressed);

        handle_input(&mut state, InputEvent::TouchStart(Some(Vec2::new(5.0, 5.0))), 0.0);
        assert_eq!(state.trail.len(), 1);
        handle_input(&mut state, InputEvent::TouchEnd, 0.0);
        assert!(state.trail.is_empty());
    }

    #[test]
    fn test_touch_without_point_is_ignored() {
        let mut state = ready_state();
        state.start_session(0.0);
        let before_pointer = state.pointer;
        let before_session = state.session.clone();
        handle_input(&mut state, InputEvent::TouchStart(None), 0.0);
        handle_input(&mut state, InputEvent::TouchMove(None), 0.0);
        assert_eq!(state.pointer, before_pointer);
        assert_eq!(state.session, before_session);
        assert!(state.trail.is_empty());
    }

    #[test]
    fn test_restart_resets_deterministically() {
        let mut state = ready_state();
        state.set_phase(GamePhase::Menu);
        handle_input(&mut state, InputEvent::Key(Key::Enter), 0.0);
        state.session.score = 7;
        state.session.lives = 1;
        state.set_phase(GamePhase::Menu);

        handle_input(&mut state, InputEvent::Key(Key::Enter), 100.0);
        let first_session = state.session.clone();
        let first_fruits: Vec<Fruit> = state.fruits.iter().cloned().collect();
        state.set_phase(GamePhase::Menu);
        handle_input(&mut state, InputEvent::Key(Key::Enter), 100.0);

        assert_eq!(state.session, first_session);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.lives, STARTING_LIVES);
        // Fresh spawns draw new random numbers
        let second_fruits: Vec<Fruit> = state.fruits.iter().cloned().collect();
        assert_ne!(first_fruits, second_fruits);
    }
}
