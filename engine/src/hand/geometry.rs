//! Planar geometry over hand landmarks: distances, the palm-center
//! proxy, and per-finger extension tests.

use super::landmarks::{HandFrame, Landmark, Point2D};

/// Thumb tip must sit this many thumb-IP-segment lengths away from the
/// index MCP to count as extended.
pub const THUMB_EXTENSION_RATIO: f32 = 1.5;

/// Euclidean distance between two image-plane points.
pub fn distance(a: Point2D, b: Point2D) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Palm-center proxy: mean of the wrist and the index/pinky MCP joints.
pub fn palm_center(frame: &HandFrame) -> Point2D {
    let w = frame.point(Landmark::Wrist);
    let i = frame.point(Landmark::IndexMcp);
    let p = frame.point(Landmark::PinkyMcp);
    Point2D::new((w.x + i.x + p.x) / 3.0, (w.y + i.y + p.y) / 3.0)
}

// ── Fingers ────────────────────────────────────────────────

/// The five digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    pub fn tip(&self) -> Landmark {
        match self {
            Self::Thumb => Landmark::ThumbTip,
            Self::Index => Landmark::IndexTip,
            Self::Middle => Landmark::MiddleTip,
            Self::Ring => Landmark::RingTip,
            Self::Pinky => Landmark::PinkyTip,
        }
    }

    /// Middle joint of the finger.  The thumb has no PIP and maps to its IP
    /// joint; the curl test never uses it, see [`thumb_extended`].
    pub fn pip(&self) -> Landmark {
        match self {
            Self::Thumb => Landmark::ThumbIp,
            Self::Index => Landmark::IndexPip,
            Self::Middle => Landmark::MiddlePip,
            Self::Ring => Landmark::RingPip,
            Self::Pinky => Landmark::PinkyPip,
        }
    }
}

/// Whether a finger is extended.
///
/// Non-thumb fingers compare tip-to-wrist against PIP-to-wrist scaled by
/// `curl_ratio`, which keeps the test independent of hand size and camera
/// distance.  The thumb uses [`thumb_extended`].
pub fn finger_extended(frame: &HandFrame, finger: Finger, curl_ratio: f32) -> bool {
    if finger == Finger::Thumb {
        return thumb_extended(frame);
    }
    let wrist = frame.point(Landmark::Wrist);
    let tip = distance(frame.point(finger.tip()), wrist);
    let pip = distance(frame.point(finger.pip()), wrist);
    tip > pip * curl_ratio
}

/// Thumb is extended when its tip is well clear of the index base
/// relative to the length of its own last segment.
pub fn thumb_extended(frame: &HandFrame) -> bool {
    let tip = frame.point(Landmark::ThumbTip);
    let to_index_base = distance(tip, frame.point(Landmark::IndexMcp));
    let last_segment = distance(tip, frame.point(Landmark::ThumbIp));
    to_index_base > last_segment * THUMB_EXTENSION_RATIO
}

/// Extension state of all five fingers for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Run the extension test on every finger.
    pub fn measure(frame: &HandFrame, curl_ratio: f32) -> Self {
        Self {
            thumb: thumb_extended(frame),
            index: finger_extended(frame, Finger::Index, curl_ratio),
            middle: finger_extended(frame, Finger::Middle, curl_ratio),
            ring: finger_extended(frame, Finger::Ring, curl_ratio),
            pinky: finger_extended(frame, Finger::Pinky, curl_ratio),
        }
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }

    /// Open hand: every finger extended.
    pub fn all_extended(&self) -> bool {
        Finger::ALL.iter().all(|f| self.is_extended(*f))
    }

    /// Closed hand: every finger curled.
    pub fn all_curled(&self) -> bool {
        Finger::ALL.iter().all(|f| !self.is_extended(*f))
    }

    /// Index out, middle/ring/pinky curled.  Thumb is ignored.
    pub fn index_only(&self) -> bool {
        self.index && !self.middle && !self.ring && !self.pinky
    }
}
