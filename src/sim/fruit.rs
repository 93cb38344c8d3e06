//! Fruit categories and the per-fruit motion model
//!
//! Exactly one fruit per category exists for the whole session. A fruit that
//! leaves the play area is replaced in place by a fresh spawn of the same
//! category; nothing is ever removed from the table.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Fruit categories, including the single hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Melon,
    Orange,
    Pomegranate,
    Guava,
    /// The hazard: slicing it costs a life
    Bomb,
}

impl FruitKind {
    pub const COUNT: usize = 5;

    /// Fixed iteration order for every pass over the table
    pub const ALL: [FruitKind; Self::COUNT] = [
        FruitKind::Melon,
        FruitKind::Orange,
        FruitKind::Pomegranate,
        FruitKind::Guava,
        FruitKind::Bomb,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            FruitKind::Melon => 0,
            FruitKind::Orange => 1,
            FruitKind::Pomegranate => 2,
            FruitKind::Guava => 3,
            FruitKind::Bomb => 4,
        }
    }

    #[inline]
    pub fn is_hazard(self) -> bool {
        self == FruitKind::Bomb
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FruitKind::Melon => "melon",
            FruitKind::Orange => "orange",
            FruitKind::Pomegranate => "pomegranate",
            FruitKind::Guava => "guava",
            FruitKind::Bomb => "bomb",
        }
    }
}

/// A sliceable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub kind: FruitKind,
    /// Top-left corner of the hit box
    pub pos: Vec2,
    /// Velocity in units per tick
    pub vel: Vec2,
    /// Time since launch (advances by `Tuning::age_step` per tick)
    pub age: f32,
    /// Airborne; a resting fruit re-rolls its launch chance every tick
    pub launched: bool,
    /// Already hit; keeps flying until it leaves the play area
    pub sliced: bool,
}

impl Fruit {
    /// Spawn a fresh fruit at the bottom edge with a random throw
    pub fn spawn<R: Rng>(kind: FruitKind, tuning: &Tuning, rng: &mut R) -> Self {
        let x = rng.random_range(tuning.spawn_x_min..tuning.spawn_x_max);
        let vx = rng.random_range(-tuning.max_drift..tuning.max_drift);
        let vy = -rng.random_range(tuning.launch_speed_min..tuning.launch_speed_max);
        let launched = rng.random::<f32>() < tuning.immediate_launch_chance;

        Self {
            kind,
            pos: Vec2::new(x, HEIGHT),
            vel: Vec2::new(vx, vy),
            age: 0.0,
            launched,
            sliced: false,
        }
    }

    /// Integrate one step of `dt` ticks: gravity, then position, then age
    pub fn advance(&mut self, tuning: &Tuning, dt: f32) {
        self.vel.y += tuning.gravity * dt;
        self.pos += self.vel * dt;
        self.age += tuning.age_step * dt;
    }

    /// True once the fruit has fallen through the floor or drifted off a side
    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.y > HEIGHT + FLOOR_MARGIN
            || self.pos.x < -SIDE_MARGIN
            || self.pos.x > WIDTH + SIDE_MARGIN
    }

    /// Square hit box anchored at the top-left corner
    #[inline]
    pub fn hit_box(&self) -> Rect {
        Rect::square(self.pos, FRUIT_SIZE)
    }

    /// Only airborne, unsliced fruit can be hit
    #[inline]
    pub fn is_sliceable(&self) -> bool {
        self.launched && !self.sliced
    }
}

/// One live fruit per category, indexed by `FruitKind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitTable {
    slots: [Fruit; FruitKind::COUNT],
}

impl FruitTable {
    /// Spawn one fruit of every category
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            slots: FruitKind::ALL.map(|kind| Fruit::spawn(kind, tuning, rng)),
        }
    }

    #[inline]
    pub fn get(&self, kind: FruitKind) -> &Fruit {
        &self.slots[kind.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, kind: FruitKind) -> &mut Fruit {
        &mut self.slots[kind.index()]
    }

    /// Replace a category's fruit with a fresh spawn
    pub fn respawn<R: Rng>(&mut self, kind: FruitKind, tuning: &Tuning, rng: &mut R) {
        self.slots[kind.index()] = Fruit::spawn(kind, tuning, rng);
    }

    /// Fruits in `FruitKind::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = &Fruit> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Fruit> {
        self.slots.iter_mut()
    }
}
