//! Held-still confirmation for the open-palm gesture.
//!
//! A fast open hand passing through the frame must not register as a palm,
//! so the palm label is only granted once the hand has stayed put for a few
//! consecutive open-hand frames.

use std::collections::VecDeque;

use crate::hand::{distance, Point2D};

/// Consecutive stable samples required before palm is confirmed.
pub const STABLE_SAMPLES: usize = 3;

/// Bounded palm-center history.
#[derive(Debug, Clone)]
pub struct PalmStability {
    history: VecDeque<Point2D>,
    capacity: usize,
    radius: f32,
}

impl PalmStability {
    pub fn new(capacity: usize, radius: f32) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            radius,
        }
    }

    /// Append a palm center from an open-hand frame.
    pub fn push(&mut self, center: Point2D) {
        self.history.push_back(center);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    /// Drop the streak; the hand is no longer open.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Whether the newest samples all sit within the radius of the oldest
    /// of them.
    pub fn is_stable(&self) -> bool {
        let n = self.history.len();
        if n < STABLE_SAMPLES {
            return false;
        }
        let mut recent = self.history.range(n - STABLE_SAMPLES..);
        let Some(anchor) = recent.next().copied() else {
            return false;
        };
        recent.all(|p| distance(anchor, *p) <= self.radius)
    }

    /// Record one open-hand frame and report whether the palm is now stable.
    pub fn observe(&mut self, center: Point2D) -> bool {
        self.push(center);
        self.is_stable()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
