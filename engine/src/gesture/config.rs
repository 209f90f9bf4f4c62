//! Gesture engine thresholds.
//!
//! Supplied once at construction; the engine never reloads them.

use anyhow::ensure;

use super::stability::STABLE_SAMPLES;

/// Default minimum palm speed (plane units/s) for a swipe.
pub const DEFAULT_SWIPE_VELOCITY: f32 = 1.0;
/// Default maximum thumb-tip to index-tip distance for a pinch.
pub const DEFAULT_PINCH_DISTANCE: f32 = 0.04;
/// Default tip/PIP wrist-distance ratio a finger must exceed to be extended.
pub const DEFAULT_CURL_RATIO: f32 = 1.1;
/// Default maximum palm drift for a held-still open hand.
pub const DEFAULT_PALM_STABILITY_RADIUS: f32 = 0.02;
/// Default palm-position history length.
pub const DEFAULT_PALM_HISTORY_CAPACITY: usize = 6;
/// Default number of velocity samples averaged.
pub const DEFAULT_VELOCITY_WINDOW: usize = 2;

/// Horizontal speed must exceed vertical speed by this factor for a swipe.
pub const SWIPE_AXIS_DOMINANCE: f32 = 1.5;

/// Configuration for gesture classification thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Minimum smoothed palm speed (plane units per second) for a swipe.
    pub swipe_velocity: f32,
    /// Maximum thumb-tip to index-tip distance (plane units) for a pinch.
    pub pinch_distance: f32,
    /// Tip/PIP ratio above which a finger counts as extended (> 1.0).
    pub curl_ratio: f32,
    /// Maximum palm-center drift (plane units) for the palm gesture.
    pub palm_stability_radius: f32,
    /// Palm-center samples retained for the stability check.
    pub palm_history_capacity: usize,
    /// Velocity samples averaged for smoothing.
    pub velocity_window: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_velocity: DEFAULT_SWIPE_VELOCITY,
            pinch_distance: DEFAULT_PINCH_DISTANCE,
            curl_ratio: DEFAULT_CURL_RATIO,
            palm_stability_radius: DEFAULT_PALM_STABILITY_RADIUS,
            palm_history_capacity: DEFAULT_PALM_HISTORY_CAPACITY,
            velocity_window: DEFAULT_VELOCITY_WINDOW,
        }
    }
}

impl GestureConfig {
    /// Reject threshold combinations the classifier cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.swipe_velocity.is_finite() && self.swipe_velocity > 0.0,
            "swipe velocity must be positive, got {}",
            self.swipe_velocity
        );
        ensure!(
            self.pinch_distance.is_finite() && self.pinch_distance > 0.0,
            "pinch distance must be positive, got {}",
            self.pinch_distance
        );
        ensure!(
            self.curl_ratio.is_finite() && self.curl_ratio > 1.0,
            "curl ratio must be greater than 1.0, got {}",
            self.curl_ratio
        );
        ensure!(
            self.palm_stability_radius.is_finite() && self.palm_stability_radius >= 0.0,
            "palm stability radius must be non-negative, got {}",
            self.palm_stability_radius
        );
        ensure!(
            self.palm_history_capacity >= STABLE_SAMPLES,
            "palm history capacity must be at least {}, got {}",
            STABLE_SAMPLES,
            self.palm_history_capacity
        );
        ensure!(
            self.velocity_window >= 1,
            "velocity window must be at least 1, got {}",
            self.velocity_window
        );
        Ok(())
    }

    /// Generate s-expression for IPC config.
    pub fn config_sexp(&self) -> String {
        format!(
            "(:swipe-velocity {:.3} :pinch-distance {:.3} :curl-ratio {:.2} :palm-stability-radius {:.3} :palm-history {} :velocity-window {})",
            self.swipe_velocity,
            self.pinch_distance,
            self.curl_ratio,
            self.palm_stability_radius,
            self.palm_history_capacity,
            self.velocity_window,
        )
    }
}
