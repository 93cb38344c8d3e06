//! Fixed timestep simulation tick
//!
//! One call advances the game by one nominal frame. Slicing is not done
//! here; it happens in the input handlers.

use rand::Rng;

use super::fruit::FruitKind;
use super::state::{EndReason, GamePhase, GameState};
use crate::consts::GAME_DURATION_SECS;

/// Advance the game state by one tick at clock time `now_ms`
pub fn tick(state: &mut GameState, now_ms: f64) {
    match state.phase {
        GamePhase::Loading | GamePhase::Menu | GamePhase::GameOver => {}
        GamePhase::ThemeSelect => state.facts.update(now_ms),
        GamePhase::Playing => tick_playing(state, now_ms),
    }
}

fn tick_playing(state: &mut GameState, now_ms: f64) {
    state.session.elapsed_secs = state.session.elapsed_at(now_ms);
    if state.session.elapsed_secs >= GAME_DURATION_SECS {
        state.end_session(EndReason::TimeUp);
        return;
    }

    state.time_ticks += 1;

    let score = state.session.score;
    state.session.difficulty.update(score, &state.tuning);
    let rates = state.session.difficulty.rates();

    for kind in FruitKind::ALL {
        let fruit = state.fruits.get_mut(kind);
        if fruit.launched {
            fruit.advance(&state.tuning, 1.0);
            if fruit.is_out_of_bounds() {
                log::debug!("Recycling {} (sliced: {})", kind.as_str(), fruit.sliced);
                state.fruits.respawn(kind, &state.tuning, &mut state.rng);
            }
        } else {
            let rate = if kind.is_hazard() {
                rates.hazard
            } else {
                rates.common
            };
            if state.rng.random::<f32>() < rate / state.tuning.spawn_divisor {
                fruit.launched = true;
            }
        }
    }

    state.facts.update(now_ms);
}
