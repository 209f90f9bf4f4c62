//! Pose classification.
//!
//! Maps one frame's landmarks and palm velocity to a single
//! [`GestureLabel`].  Rules live in an ordered table and the first match
//! wins; later rules are never evaluated once an earlier one fires.

use crate::hand::{distance, palm_center, FingerStates, HandFrame, Landmark, Point2D};

use super::config::{GestureConfig, SWIPE_AXIS_DOMINANCE};
use super::stability::PalmStability;

// ── Gesture labels ─────────────────────────────────────────

/// Recognized gesture labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureLabel {
    /// No hand, or no rule matched.
    #[default]
    None,
    /// Index finger extended, others curled.
    Draw,
    /// Thumb and index fingertips close together.
    Pinch,
    /// All fingers curled.
    Fist,
    /// All fingers extended and held still.
    Palm,
    /// Fast, predominantly horizontal hand movement.
    Swipe,
}

impl GestureLabel {
    /// Keyword name used in IPC responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Draw => "draw",
            Self::Pinch => "pinch",
            Self::Fist => "fist",
            Self::Palm => "palm",
            Self::Swipe => "swipe",
        }
    }

    /// Parse a label from its keyword name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "draw" => Some(Self::Draw),
            "pinch" => Some(Self::Pinch),
            "fist" => Some(Self::Fist),
            "palm" => Some(Self::Palm),
            "swipe" => Some(Self::Swipe),
            _ => None,
        }
    }
}

// ── Rules ──────────────────────────────────────────────────

/// Everything a rule may look at for one frame.
///
/// The palm rule appends to the stability history, so the context holds
/// it mutably.
struct PoseContext<'a> {
    frame: &'a HandFrame,
    velocity: Point2D,
    fingers: FingerStates,
    config: &'a GestureConfig,
    palm: &'a mut PalmStability,
}

type Rule = fn(&mut PoseContext<'_>) -> bool;

/// Classification priority, highest first.
const RULES: [(GestureLabel, Rule); 5] = [
    (GestureLabel::Swipe, is_swipe),
    (GestureLabel::Pinch, is_pinch),
    (GestureLabel::Fist, is_fist),
    (GestureLabel::Palm, is_stable_palm),
    (GestureLabel::Draw, is_draw),
];

/// Classify a frame.  Falls back to [`GestureLabel::None`].
pub fn classify(
    frame: &HandFrame,
    velocity: Point2D,
    config: &GestureConfig,
    palm: &mut PalmStability,
) -> GestureLabel {
    let fingers = FingerStates::measure(frame, config.curl_ratio);
    // A closed or partly closed hand breaks the palm streak even when an
    // earlier rule claims the frame.
    if !fingers.all_extended() {
        palm.clear();
    }
    let mut ctx = PoseContext {
        frame,
        velocity,
        fingers,
        config,
        palm,
    };
    RULES
        .iter()
        .find(|(_, rule)| rule(&mut ctx))
        .map(|(label, _)| *label)
        .unwrap_or_default()
}

fn is_swipe(ctx: &mut PoseContext<'_>) -> bool {
    let v = ctx.velocity;
    v.norm() > ctx.config.swipe_velocity && v.x.abs() > v.y.abs() * SWIPE_AXIS_DOMINANCE
}

fn is_pinch(ctx: &mut PoseContext<'_>) -> bool {
    let gap = distance(
        ctx.frame.point(Landmark::ThumbTip),
        ctx.frame.point(Landmark::IndexTip),
    );
    gap < ctx.config.pinch_distance
}

fn is_fist(ctx: &mut PoseContext<'_>) -> bool {
    ctx.fingers.all_curled()
}

// An open hand that is not yet stable falls through to the later rules.
fn is_stable_palm(ctx: &mut PoseContext<'_>) -> bool {
    ctx.fingers.all_extended() && ctx.palm.observe(palm_center(ctx.frame))
}

fn is_draw(ctx: &mut PoseContext<'_>) -> bool {
    ctx.fingers.index_only()
}
