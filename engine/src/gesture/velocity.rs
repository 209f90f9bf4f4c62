//! Palm velocity from consecutive frames, averaged over a short window.

use std::collections::VecDeque;

use crate::hand::{palm_center, HandFrame, Point2D};

/// Smoothed palm-velocity estimator.
///
/// Owns the last-seen frame and timestamp.  The averaging window is kept
/// short so velocity reacts within a couple of frames.
#[derive(Debug, Clone)]
pub struct VelocityEstimator {
    last_frame: Option<HandFrame>,
    last_time_ms: Option<f64>,
    samples: VecDeque<Point2D>,
    window: usize,
}

impl VelocityEstimator {
    pub fn new(window: usize) -> Self {
        Self {
            last_frame: None,
            last_time_ms: None,
            samples: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Record a frame and return the smoothed palm velocity (units/s).
    ///
    /// Returns zero without recording a sample when there is no prior
    /// frame or no time has elapsed.  An absent hand also drops the held
    /// samples, so motion after the hand reappears starts unsmoothed.
    pub fn update(&mut self, frame: Option<&HandFrame>, now_ms: f64) -> Point2D {
        let dt_s = self
            .last_time_ms
            .map(|last| ((now_ms - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);

        let velocity = match (frame, self.last_frame.as_ref()) {
            (Some(current), Some(prev)) if dt_s > 0.0 => {
                let now = palm_center(current);
                let before = palm_center(prev);
                let dt = dt_s as f32;
                let raw = Point2D::new((now.x - before.x) / dt, (now.y - before.y) / dt);
                self.push_sample(raw);
                self.mean()
            }
            (None, _) => {
                self.samples.clear();
                Point2D::ZERO
            }
            _ => Point2D::ZERO,
        };

        self.last_frame = frame.cloned();
        self.last_time_ms = Some(now_ms);
        velocity
    }

    fn push_sample(&mut self, sample: Point2D) {
        self.samples.push_back(sample);
        while self.samples.len() > self.window {
            self.samples.pop_front();
        }
    }

    fn mean(&self) -> Point2D {
        if self.samples.is_empty() {
            return Point2D::ZERO;
        }
        let n = self.samples.len() as f32;
        let (sx, sy) = self
            .samples
            .iter()
            .fold((0.0, 0.0), |(sx, sy), s| (sx + s.x, sy + s.y));
        Point2D::new(sx / n, sy / n)
    }

    /// The frame passed to the most recent update, if a hand was present.
    pub fn last_frame(&self) -> Option<&HandFrame> {
        self.last_frame.as_ref()
    }

    /// Timestamp of the most recent update.
    pub fn last_time_ms(&self) -> Option<f64> {
        self.last_time_ms
    }

    /// Number of velocity samples currently held.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn reset(&mut self) {
        self.last_frame = None;
        self.last_time_ms = None;
        self.samples.clear();
    }
}
