//! Game state and session bookkeeping
//!
//! Everything the simulation mutates lives in `GameState`; components take
//! it (or the pieces they need) explicitly. There are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultyController};
use super::facts::FactTicker;
use super::fruit::FruitTable;
use super::trail::PointerTrail;
use crate::consts::*;
use crate::tuning::Tuning;

/// Screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets; terminal if loading failed
    Loading,
    /// Choosing a background theme
    ThemeSelect,
    /// Title screen, click or Enter to play
    Menu,
    /// Active session
    Playing,
    /// Session ended, click to return to the menu
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Loading => "loading",
            GamePhase::ThemeSelect => "theme-select",
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game-over",
        }
    }
}

/// Background theme picked on the theme screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Summer,
    Winter,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Summer => "Summer",
            Theme::Winter => "Winter",
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    OutOfLives,
}

/// Per-session counters, reset at the start of every session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub lives: u8,
    pub score: u64,
    /// Clock timestamp the session started at
    pub start_ms: f64,
    /// Whole seconds since `start_ms`, refreshed every tick
    pub elapsed_secs: u64,
    pub difficulty: DifficultyController,
    pub end_reason: Option<EndReason>,
}

impl Session {
    pub fn new(tuning: &Tuning, start_ms: f64) -> Self {
        Self {
            lives: STARTING_LIVES,
            score: 0,
            start_ms,
            elapsed_secs: 0,
            difficulty: DifficultyController::new(tuning),
            end_reason: None,
        }
    }

    /// Whole seconds since the session started (never negative)
    pub fn elapsed_at(&self, now_ms: f64) -> u64 {
        ((now_ms - self.start_ms).max(0.0) / 1000.0).floor() as u64
    }

    /// Seconds left on the HUD timer
    pub fn remaining_secs(&self) -> u64 {
        GAME_DURATION_SECS.saturating_sub(self.elapsed_secs)
    }

    pub fn lives_lost(&self) -> u8 {
        STARTING_LIVES.saturating_sub(self.lives)
    }

    #[inline]
    pub fn difficulty_label(&self) -> Difficulty {
        self.difficulty.difficulty()
    }
}

/// Last known pointer position and button state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub pos: Vec2,
    pub pressed: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub theme: Theme,
    pub session: Session,
    pub fruits: FruitTable,
    pub trail: PointerTrail,
    pub pointer: Pointer,
    pub facts: FactTicker,
    /// Set when asset loading failed; the game never leaves `Loading`
    pub load_error: Option<String>,
    /// Ticks simulated in the current session
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let fruits = FruitTable::new(&tuning, &mut rng);
        Self {
            rng,
            session: Session::new(&tuning, 0.0),
            tuning,
            phase: GamePhase::Loading,
            theme: Theme::default(),
            fruits,
            trail: PointerTrail::default(),
            pointer: Pointer::default(),
            facts: FactTicker::default(),
            load_error: None,
            time_ticks: 0,
        }
    }

    /// Resolve the one-time asset load
    pub fn finish_loading(&mut self, result: anyhow::Result<()>) {
        if self.phase != GamePhase::Loading || self.load_error.is_some() {
            return;
        }
        match result {
            Ok(()) => self.set_phase(GamePhase::ThemeSelect),
            Err(e) => {
                log::error!("Error loading assets: {e:#}");
                self.load_error = Some(format!("Error loading assets: {e:#}"));
            }
        }
    }

    /// Fresh session: counters, fruit and trail all reset, clock restarted
    pub fn start_session(&mut self, now_ms: f64) {
        self.session = Session::new(&self.tuning, now_ms);
        self.fruits = FruitTable::new(&self.tuning, &mut self.rng);
        self.trail.clear();
        self.time_ticks = 0;
        self.set_phase(GamePhase::Playing);
    }

    pub fn end_session(&mut self, reason: EndReason) {
        self.session.end_reason = Some(reason);
        log::info!(
            "Session over ({:?}): score {}, lives {}, {}s over {} ticks",
            reason,
            self.session.score,
            self.session.lives,
            self.session.elapsed_secs,
            self.time_ticks
        );
        self.set_phase(GamePhase::GameOver);
    }

    /// Switch phase; leaving `Playing` always drops the trail
    pub fn set_phase(&mut self, phase: GamePhase) {
        if phase == self.phase {
            return;
        }
        if self.phase == GamePhase::Playing {
            self.trail.clear();
        }
        log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
