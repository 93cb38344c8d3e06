//! Scrolling fruit trivia shown when the professor is clicked

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::WIDTH;

pub const FRUIT_FACTS: [&str; 12] = [
    "Did you know that bananas are berries?",
    "Grapes can be used to make wine.",
    "Melons are an excellent choice for staying hydrated.",
    "Guavas are sometimes called 'the poor man's apple'.",
    "Each pomegranate can contain hundreds of juicy seeds, known as arils.",
    "Oranges are a good source of vitamin C.",
    "Cranberries can bounce!",
    "Orange trees can live for up to 100 years and continue to produce fruit throughout their long lives.",
    "Guavas are often referred to as superfruits because of their high nutritional value.",
    "Pomegranates are known as 'nature's candy' due to their sweet and tart flavor.",
    "Some oranges can be fully ripe while still green in color.",
    "The world's heaviest melon on record weighed over 350 pounds!",
];

/// How long a fact stays up after it is requested
pub const FACT_DISPLAY_MS: f64 = 3000.0;
/// Leftward scroll per tick
pub const FACT_SCROLL_SPEED: f32 = 2.0;

/// A fact currently on screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFact {
    pub index: usize,
    pub x: f32,
    pub shown_at_ms: f64,
}

impl ActiveFact {
    pub fn text(&self) -> &'static str {
        FRUIT_FACTS[self.index]
    }
}

/// Picks facts without repeats until every fact has been shown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactTicker {
    shown: Vec<usize>,
    pub active: Option<ActiveFact>,
}

impl FactTicker {
    /// Start scrolling a fact not shown since the last reset
    pub fn request<R: Rng>(&mut self, rng: &mut R, now_ms: f64) -> &'static str {
        if self.shown.len() >= FRUIT_FACTS.len() {
            self.shown.clear();
        }

        let available: Vec<usize> = (0..FRUIT_FACTS.len())
            .filter(|i| !self.shown.contains(i))
            .collect();
        let index = available[rng.random_range(0..available.len())];
        self.shown.push(index);

        self.active = Some(ActiveFact {
            index,
            x: WIDTH,
            shown_at_ms: now_ms,
        });
        FRUIT_FACTS[index]
    }

    /// Scroll the active fact and drop it once its display time is over
    pub fn update(&mut self, now_ms: f64) {
        if let Some(fact) = &mut self.active {
            if now_ms - fact.shown_at_ms >= FACT_DISPLAY_MS {
                self.active = None;
            } else {
                fact.x -= FACT_SCROLL_SPEED;
            }
        }
    }

    pub fn shown_count(&self) -> usize {
        self.shown.len()
    }
}
