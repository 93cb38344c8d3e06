//! Score-driven difficulty
//!
//! Accuracy is a proxy derived from cumulative score alone, so it only ever
//! rises during a session. Between the two thresholds the last applied rate
//! set stays in force.

use serde::{Deserialize, Serialize};

use crate::tuning::{SpawnRates, Tuning};

/// Difficulty label shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }
}

/// `(score + 1) / (score + 2)`: 0.5 at zero, strictly increasing, below 1
#[inline]
pub fn accuracy(score: u64) -> f64 {
    let s = score as f64;
    (s + 1.0) / (s + 2.0)
}

/// Current label and spawn rates; only `update` and `reset` change them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyController {
    difficulty: Difficulty,
    rates: SpawnRates,
}

impl DifficultyController {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            difficulty: Difficulty::Easy,
            rates: tuning.initial_rates,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[inline]
    pub fn rates(&self) -> SpawnRates {
        self.rates
    }

    /// Re-derive rates from the score; returns true when the label changed
    pub fn update(&mut self, score: u64, tuning: &Tuning) -> bool {
        let acc = accuracy(score);
        let next = if acc > tuning.hard_threshold as f64 {
            self.rates = tuning.hard_rates;
            Difficulty::Hard
        } else if acc < tuning.easy_threshold as f64 {
            self.rates = tuning.easy_rates;
            Difficulty::Easy
        } else {
            return false;
        };

        let changed = next != self.difficulty;
        if changed {
            log::info!(
                "Difficulty {} -> {} (score {})",
                self.difficulty.as_str(),
                next.as_str(),
                score
            );
        }
        self.difficulty = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accuracy_at_zero() {
        assert_eq!(accuracy(0), 0.5);
    }

    #[test]
    fn test_starts_easy_with_initial_rates() {
        let tuning = Tuning::default();
        let ctl = DifficultyController::new(&tuning);
        assert_eq!(ctl.difficulty(), Difficulty::Easy);
        assert_eq!(ctl.rates(), tuning.initial_rates);
    }

    #[test]
    fn test_middle_band_keeps_last_rates() {
        let tuning = Tuning::default();
        let mut ctl = DifficultyController::new(&tuning);
        // accuracy(3) = 0.8 exactly: not above the Hard threshold
        for score in 0..=3 {
            assert!(!ctl.update(score, &tuning));
            assert_eq!(ctl.rates(), tuning.initial_rates);
            assert_eq!(ctl.difficulty(), Difficulty::Easy);
        }
    }

    #[test]
    fn test_ratchets_to_hard() {
        let tuning = Tuning::default();
        let mut ctl = DifficultyController::new(&tuning);
        assert!(ctl.update(4, &tuning));
        assert_eq!(ctl.difficulty(), Difficulty::Hard);
        assert_eq!(ctl.rates(), tuning.hard_rates);
        // Staying Hard is not a change
        assert!(!ctl.update(5, &tuning));
    }

    #[test]
    fn test_easy_threshold_applies_easy_rates() {
        let tuning = Tuning {
            easy_threshold: 0.6,
            ..Tuning::default()
        };
        let mut ctl = DifficultyController::new(&tuning);
        ctl.update(0, &tuning);
        assert_eq!(ctl.difficulty(), Difficulty::Easy);
        assert_eq!(ctl.rates(), tuning.easy_rates);
    }

    #[test]
    fn test_reset() {
        let tuning = Tuning::default();
        let mut ctl = DifficultyController::new(&tuning);
        ctl.update(50, &tuning);
        ctl.reset(&tuning);
        assert_eq!(ctl, DifficultyController::new(&tuning));
    }

    proptest! {
        #[test]
        fn prop_accuracy_strictly_increasing(score in 0u64..1_000_000) {
            prop_assert!(accuracy(score) < accuracy(score + 1));
        }

        #[test]
        fn prop_accuracy_below_one(score in any::<u32>()) {
            prop_assert!(accuracy(score as u64) < 1.0);
        }
    }
}
