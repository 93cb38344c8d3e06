//! Data-driven game balance
//!
//! Every knob that shapes how the game feels lives here so it can be
//! tweaked from JSON without touching the simulation. `Default` carries the
//! shipped values.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Spawn rates applied as a pair by the difficulty controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRates {
    /// Launch rate shared by every non-hazard fruit
    pub common: f32,
    /// Launch rate of the bomb
    pub hazard: f32,
}

/// Balance parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Horizontal band `[min, max)` a fruit spawns in
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// Largest horizontal drift magnitude at spawn
    pub max_drift: f32,
    /// Upward launch speed range `[min, max)` (applied as negative vy)
    pub launch_speed_min: f32,
    pub launch_speed_max: f32,
    /// Chance that a freshly spawned fruit is airborne immediately
    pub immediate_launch_chance: f32,
    /// Age added per tick while airborne
    pub age_step: f32,
    /// Rightward kick given to a fruit when it is sliced
    pub slice_boost: f32,
    /// Rates are divided by this to get a per-tick launch probability.
    /// Tied to the tick rate: halving the tick rate without changing this
    /// halves the arrival rate.
    pub spawn_divisor: f32,
    /// Rates at the start of each session
    pub initial_rates: SpawnRates,
    /// Rates while the difficulty reads Easy
    pub easy_rates: SpawnRates,
    /// Rates while the difficulty reads Hard
    pub hard_rates: SpawnRates,
    /// Accuracy above this switches to Hard
    pub hard_threshold: f32,
    /// Accuracy below this switches to Easy
    pub easy_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.15,
            spawn_x_min: 100.0,
            spawn_x_max: 500.0,
            max_drift: 1.0,
            launch_speed_min: 8.0,
            launch_speed_max: 14.0,
            immediate_launch_chance: 0.75,
            age_step: 0.1,
            slice_boost: 10.0,
            spawn_divisor: 6.0,
            initial_rates: SpawnRates {
                common: 0.2,
                hazard: 0.1,
            },
            easy_rates: SpawnRates {
                common: 0.3,
                hazard: 0.02,
            },
            hard_rates: SpawnRates {
                common: 0.03,
                hazard: 0.2,
            },
            hard_threshold: 0.8,
            easy_threshold: 0.3,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("invalid tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the motion model cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.spawn_x_min >= self.spawn_x_max {
            anyhow::bail!(
                "spawn band is empty: [{}, {})",
                self.spawn_x_min,
                self.spawn_x_max
            );
        }
        if self.launch_speed_min <= 0.0 || self.launch_speed_min >= self.launch_speed_max {
            anyhow::bail!(
                "launch speed range must be positive and non-empty: [{}, {})",
                self.launch_speed_min,
                self.launch_speed_max
            );
        }
        if self.gravity < 0.0 {
            anyhow::bail!("gravity must not pull upward: {}", self.gravity);
        }
        if self.max_drift <= 0.0 {
            anyhow::bail!("max_drift must be positive: {}", self.max_drift);
        }
        if self.spawn_divisor <= 0.0 {
            anyhow::bail!("spawn_divisor must be positive: {}", self.spawn_divisor);
        }
        if !(0.0..=1.0).contains(&self.immediate_launch_chance) {
            anyhow::bail!(
                "immediate_launch_chance out of range: {}",
                self.immediate_launch_chance
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.3);
        assert_eq!(tuning.spawn_divisor, 6.0);
        assert_eq!(tuning.hard_rates, Tuning::default().hard_rates);
    }

    #[test]
    fn test_rejects_empty_spawn_band() {
        let err = Tuning::from_json(r#"{ "spawn_x_min": 500.0, "spawn_x_max": 100.0 }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
