//! Hit detection and slice resolution
//!
//! Two ways to hit a fruit: the pointer itself sitting inside the fruit's
//! box, or a trail segment passing close to the box centre. Only airborne,
//! unsliced fruit can be hit.

use glam::Vec2;

use super::fruit::{Fruit, FruitKind};
use super::geometry::distance_to_segment;
use super::state::{EndReason, GameState};
use super::trail::PointerTrail;
use crate::consts::TRAIL_HIT_RADIUS;

/// True if `pointer` lies strictly inside the fruit's hit box
#[inline]
pub fn test_hit(pointer: Vec2, fruit: &Fruit) -> bool {
    fruit.hit_box().contains_strict(pointer)
}

/// True if any trail segment passes within the hit radius of the box centre
pub fn test_trail_hit(trail: &PointerTrail, fruit: &Fruit) -> bool {
    let center = fruit.hit_box().center();
    trail
        .segments()
        .any(|(a, b)| distance_to_segment(center, a, b) < TRAIL_HIT_RADIUS)
}

/// What a slice pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceReport {
    /// Fruit sliced, in table order
    pub sliced: Vec<FruitKind>,
    pub points: u64,
    pub lives_lost: u8,
    /// A hazard hit took the last life
    pub game_over: bool,
}

/// Test every sliceable fruit against the pointer and trail and apply hits
///
/// The trail only counts while the pointer is held and has at least one
/// segment. The pass stops early if a hazard hit ends the session.
pub fn slice_pass(state: &mut GameState) -> SliceReport {
    let mut report = SliceReport::default();
    if !state.is_playing() {
        return report;
    }

    let pointer = state.pointer;
    let use_trail = pointer.pressed && state.trail.len() > 1;

    for kind in FruitKind::ALL {
        let fruit = state.fruits.get_mut(kind);
        if !fruit.is_sliceable() {
            continue;
        }

        let hit =
            test_hit(pointer.pos, fruit) || (use_trail && test_trail_hit(&state.trail, fruit));
        if !hit {
            continue;
        }

        fruit.vel.x += state.tuning.slice_boost;
        fruit.sliced = true;
        report.sliced.push(kind);

        if kind.is_hazard() {
            state.session.lives = state.session.lives.saturating_sub(1);
            report.lives_lost += 1;
            log::debug!("Bomb hit, {} lives left", state.session.lives);
            if state.session.lives == 0 {
                report.game_over = true;
                state.end_session(EndReason::OutOfLives);
                break;
            }
        } else {
            state.session.score += 1;
            report.points += 1;
            log::debug!("Sliced {} (score {})", kind.as_str(), state.session.score);
        }
    }

    report
}
