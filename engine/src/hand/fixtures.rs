//! Synthetic hand poses for tests.
//!
//! Coordinates are normalized image units with the wrist at the origin and
//! fingers pointing toward +y.

use super::landmarks::{HandFrame, Point2D, LANDMARK_COUNT};

const fn p(x: f32, y: f32) -> Point2D {
    Point2D::new(x, y)
}

const WRIST: Point2D = p(0.0, 0.0);

const THUMB_OUT: [Point2D; 4] = [p(-0.03, 0.03), p(-0.06, 0.06), p(-0.09, 0.08), p(-0.12, 0.10)];
const THUMB_TUCKED: [Point2D; 4] = [p(-0.03, 0.03), p(-0.05, 0.05), p(-0.05, 0.06), p(0.01, 0.05)];
// Thumb tip touching the extended index tip.
const THUMB_PINCHING: [Point2D; 4] = [p(-0.03, 0.03), p(-0.05, 0.08), p(-0.07, 0.15), p(-0.045, 0.20)];

const INDEX_OUT: [Point2D; 4] = [p(-0.03, 0.10), p(-0.035, 0.15), p(-0.037, 0.18), p(-0.04, 0.21)];
const MIDDLE_OUT: [Point2D; 4] = [p(0.0, 0.10), p(0.0, 0.16), p(0.0, 0.19), p(0.0, 0.22)];
const RING_OUT: [Point2D; 4] = [p(0.03, 0.10), p(0.035, 0.15), p(0.037, 0.18), p(0.04, 0.20)];
const PINKY_OUT: [Point2D; 4] = [p(0.06, 0.09), p(0.065, 0.13), p(0.067, 0.15), p(0.07, 0.17)];

const fn curled(x: f32, mcp_y: f32) -> [Point2D; 4] {
    [p(x, mcp_y), p(x, 0.14), p(x, 0.12), p(x, 0.11)]
}

const INDEX_IN: [Point2D; 4] = curled(-0.03, 0.10);
const MIDDLE_IN: [Point2D; 4] = curled(0.0, 0.10);
const RING_IN: [Point2D; 4] = curled(0.03, 0.10);
const PINKY_IN: [Point2D; 4] = curled(0.06, 0.09);

fn assemble(fingers: [[Point2D; 4]; 5]) -> HandFrame {
    let mut points = [Point2D::ZERO; LANDMARK_COUNT];
    points[0] = WRIST;
    for (f, finger) in fingers.iter().enumerate() {
        for (j, point) in finger.iter().enumerate() {
            points[1 + f * 4 + j] = *point;
        }
    }
    HandFrame::new(points)
}

/// All five fingers extended.
pub fn open_hand() -> HandFrame {
    assemble([THUMB_OUT, INDEX_OUT, MIDDLE_OUT, RING_OUT, PINKY_OUT])
}

/// All five fingers curled, thumb tucked, tips apart.
pub fn fist() -> HandFrame {
    assemble([THUMB_TUCKED, INDEX_IN, MIDDLE_IN, RING_IN, PINKY_IN])
}

/// Index extended, everything else curled.
pub fn pointing() -> HandFrame {
    assemble([THUMB_TUCKED, INDEX_OUT, MIDDLE_IN, RING_IN, PINKY_IN])
}

/// Index extended with the thumb tip resting on it.
pub fn pinching() -> HandFrame {
    assemble([THUMB_PINCHING, INDEX_OUT, MIDDLE_IN, RING_IN, PINKY_IN])
}

/// Uniformly scale every point about the origin.
pub fn scaled(frame: &HandFrame, k: f32) -> HandFrame {
    let mut points = *frame.points();
    for pt in &mut points {
        pt.x *= k;
        pt.y *= k;
    }
    HandFrame::new(points)
}
