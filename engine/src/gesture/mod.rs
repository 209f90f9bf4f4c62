//! Gesture engine: per-frame classification of a single tracked hand.
//!
//! Pipeline, run once per `process` call:
//! - `velocity`: smoothed palm velocity from consecutive frames
//! - `classifier`: ordered pose rules producing one `GestureLabel`
//! - `stability`: held-still gate for the palm gesture
//! - `tracker`: current/previous label and hold duration
//!
//! Single-threaded and synchronous.  Each call is bounded work over 21
//! points and a few short histories.

pub mod classifier;
pub mod config;
pub mod stability;
pub mod tracker;
pub mod velocity;

use tracing::{debug, warn};

use crate::hand::{HandFrame, Point2D};

pub use classifier::{classify, GestureLabel};
pub use config::GestureConfig;
pub use stability::PalmStability;
pub use tracker::GestureTracker;
pub use velocity::VelocityEstimator;

// ── Output ─────────────────────────────────────────────────

/// Engine output for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// Label for this frame.
    pub current: GestureLabel,
    /// Label held before the most recent transition.
    pub previous: GestureLabel,
    /// Time since `current` began (ms).
    pub duration_ms: f64,
    /// Smoothed palm velocity (plane units per second).
    pub velocity: Point2D,
    /// Always 1.0; reserved for probabilistic scoring.
    pub confidence: f32,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            current: GestureLabel::None,
            previous: GestureLabel::None,
            duration_ms: 0.0,
            velocity: Point2D::ZERO,
            confidence: 1.0,
        }
    }
}

impl GestureState {
    /// Generate s-expression for IPC status.
    pub fn to_sexp(&self) -> String {
        format!(
            "(:current :{} :previous :{} :duration-ms {:.1} :velocity (:x {:.4} :y {:.4}) :confidence {:.2})",
            self.current.as_str(),
            self.previous.as_str(),
            self.duration_ms,
            self.velocity.x,
            self.velocity.y,
            self.confidence,
        )
    }
}

// ── Session ────────────────────────────────────────────────

/// All rolling state for one capture session.
#[derive(Debug, Clone)]
pub struct EngineSession {
    velocity: VelocityEstimator,
    palm: PalmStability,
    tracker: GestureTracker,
}

impl EngineSession {
    fn new(config: &GestureConfig) -> Self {
        Self {
            velocity: VelocityEstimator::new(config.velocity_window),
            palm: PalmStability::new(config.palm_history_capacity, config.palm_stability_radius),
            tracker: GestureTracker::new(),
        }
    }

    pub fn velocity(&self) -> &VelocityEstimator {
        &self.velocity
    }

    pub fn palm(&self) -> &PalmStability {
        &self.palm
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    fn reset(&mut self) {
        self.velocity.reset();
        self.palm.clear();
        self.tracker.reset();
    }
}

// ── Engine ─────────────────────────────────────────────────

/// Gesture recognition for one hand.
///
/// Independent hands or sessions are independent engines.
#[derive(Debug, Clone)]
pub struct GestureEngine {
    config: GestureConfig,
    session: EngineSession,
    last_state: Option<GestureState>,
}

impl GestureEngine {
    /// Create an engine, rejecting unusable thresholds.
    pub fn new(config: GestureConfig) -> anyhow::Result<Self> {
        config.validate()?;
        debug!("Gesture engine configured: {}", config.config_sexp());
        Ok(Self {
            session: EngineSession::new(&config),
            config,
            last_state: None,
        })
    }

    /// Classify one video frame.
    ///
    /// `frame` is `None` when the estimator found no hand.  `now_ms` must
    /// not decrease across calls; debug builds assert this, release builds
    /// clamp elapsed time to zero.
    pub fn process(&mut self, frame: Option<&HandFrame>, now_ms: f64) -> GestureState {
        if let Some(last) = self.session.velocity.last_time_ms() {
            debug_assert!(now_ms >= last, "timestamp went backwards: {now_ms} < {last}");
            if now_ms < last {
                warn!("non-monotonic frame timestamp: {:.1} < {:.1}", now_ms, last);
            }
        }

        let velocity = self.session.velocity.update(frame, now_ms);

        let label = match frame {
            Some(frame) => classify(frame, velocity, &self.config, &mut self.session.palm),
            None => {
                self.session.palm.clear();
                GestureLabel::None
            }
        };

        let duration_ms = self.session.tracker.update(label, now_ms);
        let state = GestureState {
            current: self.session.tracker.current(),
            previous: self.session.tracker.previous(),
            duration_ms,
            velocity,
            confidence: 1.0,
        };
        self.last_state = Some(state);
        state
    }

    /// Output of the most recent `process` call.
    pub fn last_state(&self) -> Option<&GestureState> {
        self.last_state.as_ref()
    }

    /// Most recent frame with a hand in it, for the renderer.
    pub fn last_frame(&self) -> Option<&HandFrame> {
        self.session.velocity.last_frame()
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn session(&self) -> &EngineSession {
        &self.session
    }

    /// Drop all rolling state, as if freshly constructed.
    pub fn reset(&mut self) {
        self.session.reset();
        self.last_state = None;
    }

    /// Generate s-expression for IPC status.
    pub fn status_sexp(&self) -> String {
        let state = self.last_state.unwrap_or_default();
        format!(
            "(:palm-samples {} :velocity-samples {} :state {})",
            self.session.palm.len(),
            self.session.velocity.sample_count(),
            state.to_sexp(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::fixtures;

    const FRAME_MS: f64 = 33.0;

    fn engine() -> GestureEngine {
        GestureEngine::new(GestureConfig::default()).unwrap()
    }

    /// Feed `frames` at a steady 33ms cadence starting at `t0`.
    fn run(
        engine: &mut GestureEngine,
        frames: &[Option<HandFrame>],
        t0: f64,
    ) -> Vec<GestureState> {
        frames
            .iter()
            .enumerate()
            .map(|(i, f)| engine.process(f.as_ref(), t0 + FRAME_MS * i as f64))
            .collect()
    }

    #[test]
    fn test_new_engine() {
        let e = engine();
        assert!(e.last_state().is_none());
        assert!(e.last_frame().is_none());
        assert!(e.session().palm().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GestureConfig {
            curl_ratio: 0.9,
            ..Default::default()
        };
        assert!(GestureEngine::new(config).is_err());
    }

    #[test]
    fn test_first_frame_velocity_is_zero() {
        let mut e = engine();
        let s = e.process(Some(&fixtures::pinching()), 1000.0);
        assert_eq!(s.velocity, Point2D::ZERO);
        assert_eq!(s.current, GestureLabel::Pinch);
        assert_eq!(s.duration_ms, 0.0);
        assert_eq!(s.confidence, 1.0);
    }

    #[test]
    fn test_pinch_detection() {
        let mut e = engine();
        let pinch = Some(fixtures::pinching());
        let states = run(&mut e, &[pinch.clone(), pinch.clone(), pinch], 0.0);
        assert!(states.iter().all(|s| s.current == GestureLabel::Pinch));
    }

    #[test]
    fn test_palm_after_three_stable_frames() {
        let mut e = engine();
        let open = Some(fixtures::open_hand());
        let states = run(&mut e, &[open.clone(), open.clone(), open], 0.0);
        assert_eq!(states[0].current, GestureLabel::None);
        assert_eq!(states[1].current, GestureLabel::None);
        assert_eq!(states[2].current, GestureLabel::Palm);
        assert_eq!(states[2].previous, GestureLabel::None);
        assert_eq!(states[2].duration_ms, 0.0);
    }

    #[test]
    fn test_brief_open_hand_never_palm() {
        let mut e = engine();
        let open = Some(fixtures::open_hand());
        let fist = Some(fixtures::fist());
        let states = run(
            &mut e,
            &[open.clone(), open.clone(), fist, open.clone(), open],
            0.0,
        );
        assert!(
            states.iter().all(|s| s.current != GestureLabel::Palm),
            "got {:?}",
            states.iter().map(|s| s.current).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn test_swipe_regardless_of_pose() {
        let mut e = engine();
        let base = fixtures::fist();
        // 0.05 units per 33ms is ~1.5 units/s, horizontal.
        let frames: Vec<_> = (0..3)
            .map(|i| Some(base.translated(0.05 * i as f32, 0.0)))
            .collect();
        let states = run(&mut e, &frames, 0.0);
        assert_eq!(states[0].current, GestureLabel::Fist);
        assert_eq!(states[1].current, GestureLabel::Swipe);
        assert!(states[1].velocity.x > 1.0, "got {:?}", states[1].velocity);
        assert_eq!(states[1].previous, GestureLabel::Fist);
        assert_eq!(states[2].current, GestureLabel::Swipe);
    }

    #[test]
    fn test_vertical_motion_is_not_swipe() {
        let mut e = engine();
        let base = fixtures::pointing();
        let frames: Vec<_> = (0..3)
            .map(|i| Some(base.translated(0.0, -0.05 * i as f32)))
            .collect();
        let states = run(&mut e, &frames, 0.0);
        assert!(states.iter().all(|s| s.current == GestureLabel::Draw));
    }

    #[test]
    fn test_absent_hand_after_gesture() {
        let mut e = engine();
        let states = run(&mut e, &[Some(fixtures::fist()), None], 0.0);
        assert_eq!(states[1].current, GestureLabel::None);
        assert_eq!(states[1].previous, GestureLabel::Fist);
        assert_eq!(states[1].velocity, Point2D::ZERO);
        assert!(e.last_frame().is_none());
    }

    #[test]
    fn test_absent_hand_clears_palm_history() {
        let mut e = engine();
        let open = Some(fixtures::open_hand());
        run(&mut e, &[open.clone(), open.clone()], 0.0);
        assert_eq!(e.session().palm().len(), 2);
        e.process(None, 100.0);
        assert!(e.session().palm().is_empty());
    }

    #[test]
    fn test_no_hand_duration_accumulates() {
        let mut e = engine();
        let states = run(&mut e, &[None, None, None], 500.0);
        assert_eq!(states[0].duration_ms, 0.0);
        assert!((states[2].duration_ms - 2.0 * FRAME_MS).abs() < 1e-9);
        assert!(states.iter().all(|s| s.current == GestureLabel::None));
    }

    #[test]
    fn test_previous_tracks_last_transition() {
        let mut e = engine();
        let frames = [
            Some(fixtures::fist()),
            Some(fixtures::fist()),
            Some(fixtures::pointing()),
            Some(fixtures::pointing()),
            None,
            Some(fixtures::pinching()),
            Some(fixtures::pinching()),
        ];
        let states = run(&mut e, &frames, 0.0);

        for pair in states.windows(2) {
            let (before, after) = (pair[0], pair[1]);
            if after.current != before.current {
                assert_eq!(after.previous, before.current);
                assert_eq!(after.duration_ms, 0.0);
            } else {
                assert_eq!(after.previous, before.previous);
                assert!(after.duration_ms >= before.duration_ms);
            }
        }
        let labels: Vec<_> = states.iter().map(|s| s.current).collect();
        assert_eq!(
            labels,
            vec![
                GestureLabel::Fist,
                GestureLabel::Fist,
                GestureLabel::Draw,
                GestureLabel::Draw,
                GestureLabel::None,
                GestureLabel::Pinch,
                GestureLabel::Pinch,
            ]
        );
    }

    #[test]
    fn test_histories_stay_bounded() {
        let mut e = engine();
        let open = fixtures::open_hand();
        for i in 0..30 {
            // Small jitter keeps the palm stable while samples accumulate.
            let jitter = if i % 2 == 0 { 0.001 } else { 0.0 };
            e.process(Some(&open.translated(jitter, 0.0)), FRAME_MS * i as f64);
            assert!(e.session().palm().len() <= 6);
            assert!(e.session().velocity().sample_count() <= 2);
        }
        assert_eq!(e.last_state().unwrap().current, GestureLabel::Palm);
    }

    #[test]
    fn test_last_frame_keeps_world_points() {
        use crate::hand::{Point3D, LANDMARK_COUNT};

        let mut e = engine();
        let world = [Point3D { x: 0.0, y: 0.0, z: -0.4 }; LANDMARK_COUNT];
        let frame = fixtures::pointing().with_world(world);
        e.process(Some(&frame), 0.0);
        let kept = e.last_frame().and_then(|f| f.world()).unwrap();
        assert_eq!(kept[0].z, -0.4);
    }

    #[test]
    fn test_reset() {
        let mut e = engine();
        run(&mut e, &[Some(fixtures::fist()), Some(fixtures::fist())], 0.0);
        e.reset();
        assert!(e.last_state().is_none());
        assert!(e.session().tracker().started_at_ms().is_none());
        let s = e.process(Some(&fixtures::fist()), 10_000.0);
        assert_eq!(s.previous, GestureLabel::None);
        assert_eq!(s.velocity, Point2D::ZERO);
    }

    #[test]
    fn test_status_sexp() {
        let mut e = engine();
        let idle = e.status_sexp();
        assert!(idle.contains(":current :none"), "got {idle}");

        e.process(Some(&fixtures::fist()), 0.0);
        let sexp = e.status_sexp();
        assert!(sexp.contains(":current :fist"), "got {sexp}");
        assert!(sexp.contains(":previous :none"));
        assert!(sexp.contains(":confidence 1.00"));
    }
}
