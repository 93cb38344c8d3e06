//! Demo player
//!
//! Picks a pointer target for attract mode and the headless native run.
//! Never aims anywhere the bomb's box could catch the press.

use glam::Vec2;

use super::collision::test_hit;
use super::fruit::FruitKind;
use super::state::GameState;

/// Centre of the lowest sliceable fruit, unless pressing there would also hit the bomb
pub fn choose_target(state: &GameState) -> Option<Vec2> {
    if !state.is_playing() {
        return None;
    }

    let bomb = state.fruits.get(FruitKind::Bomb);
    state
        .fruits
        .iter()
        .filter(|f| !f.kind.is_hazard() && f.is_sliceable())
        .map(|f| f.hit_box().center())
        .filter(|target| !(bomb.is_sliceable() && test_hit(*target, bomb)))
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
}
