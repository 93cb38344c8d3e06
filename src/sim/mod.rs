//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed iteration order (`FruitKind::ALL`)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod collision;
pub mod difficulty;
pub mod facts;
pub mod fruit;
pub mod geometry;
pub mod input;
pub mod state;
pub mod tick;
pub mod trail;

pub use autoplay::choose_target;
pub use collision::{SliceReport, slice_pass, test_hit, test_trail_hit};
pub use difficulty::{Difficulty, DifficultyController, accuracy};
pub use facts::{ActiveFact, FactTicker};
pub use fruit::{Fruit, FruitKind, FruitTable};
pub use geometry::{Rect, distance_to_segment};
pub use input::{InputEvent, Key, handle_input, professor_rect, theme_button};
pub use state::{EndReason, GamePhase, GameState, Pointer, Session, Theme};
pub use tick::tick;
pub use trail::PointerTrail;
