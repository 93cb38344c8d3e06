//! Bounded pointer history for swipe slicing

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TRAIL_CAPACITY;

/// Recent pointer positions, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerTrail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Default for PointerTrail {
    fn default() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }
}

impl PointerTrail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity: capacity.max(1),
        }
    }

    /// Append a position, evicting the oldest once full
    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    /// Consecutive point pairs; empty until at least two points are recorded
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| (*a, *b))
    }
}
