//! Current/previous gesture bookkeeping and hold duration.

use tracing::debug;

use super::classifier::GestureLabel;

/// Tracks the active label, the one before it, and when it began.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    current: GestureLabel,
    previous: GestureLabel,
    /// Set on the first update, then on every transition.
    started_at_ms: Option<f64>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this frame's label and return how long it has been held (ms).
    pub fn update(&mut self, label: GestureLabel, now_ms: f64) -> f64 {
        let start = *self.started_at_ms.get_or_insert(now_ms);

        if label != self.current {
            debug!(
                "Gesture transition: {} -> {} after {:.0}ms",
                self.current.as_str(),
                label.as_str(),
                (now_ms - start).max(0.0),
            );
            self.previous = self.current;
            self.current = label;
            self.started_at_ms = Some(now_ms);
            return 0.0;
        }

        (now_ms - start).max(0.0)
    }

    pub fn current(&self) -> GestureLabel {
        self.current
    }

    pub fn previous(&self) -> GestureLabel {
        self.previous
    }

    pub fn started_at_ms(&self) -> Option<f64> {
        self.started_at_ms
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
