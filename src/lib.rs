//! Fruit Slash - swipe to slice falling fruit, avoid the bomb
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, hit detection, difficulty, phases)
//! - `renderer`: Draw-list generation and the browser canvas backend
//! - `platform`: Clock / asset / render seams and native implementations
//! - `runner`: Fixed-timestep driver shared by both front ends
//! - `tuning`: Data-driven game balance
//! - `settings` / `highscores`: Player data, stored via `persistence`

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate; all per-tick quantities assume it
    pub const TICKS_PER_SECOND: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (origin top-left, y grows downward)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 500.0;

    /// Session length in whole seconds
    pub const GAME_DURATION_SECS: u64 = 60;
    /// Lives at the start of every session
    pub const STARTING_LIVES: u8 = 3;

    /// Side of the square hit box anchored at a fruit's top-left corner
    pub const FRUIT_SIZE: f32 = 60.0;
    /// A trail segment slices a fruit if it passes closer than this to the box centre
    pub const TRAIL_HIT_RADIUS: f32 = 30.0;
    /// Pointer positions kept for swipe detection
    pub const TRAIL_CAPACITY: usize = 5;

    /// Margin past the bottom edge before a fruit is recycled
    pub const FLOOR_MARGIN: f32 = 60.0;
    /// Margin past either side before a fruit is recycled
    pub const SIDE_MARGIN: f32 = 100.0;
}
