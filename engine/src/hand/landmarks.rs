//! Hand landmark data structures.
//!
//! Models the 21 anatomically-indexed points produced by a hand-pose
//! estimator for one hand in one video frame.  Frames are read-only once
//! built; the engine never mutates them.

use anyhow::bail;

// ── Landmark definitions ───────────────────────────────────

/// The 21 anatomical landmark roles, in estimator output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl Landmark {
    /// All landmarks in index order.
    pub const ALL: [Landmark; LANDMARK_COUNT] = [
        Self::Wrist,
        Self::ThumbCmc,
        Self::ThumbMcp,
        Self::ThumbIp,
        Self::ThumbTip,
        Self::IndexMcp,
        Self::IndexPip,
        Self::IndexDip,
        Self::IndexTip,
        Self::MiddleMcp,
        Self::MiddlePip,
        Self::MiddleDip,
        Self::MiddleTip,
        Self::RingMcp,
        Self::RingPip,
        Self::RingDip,
        Self::RingTip,
        Self::PinkyMcp,
        Self::PinkyPip,
        Self::PinkyDip,
        Self::PinkyTip,
    ];

    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Kebab-case role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb-cmc",
            Self::ThumbMcp => "thumb-mcp",
            Self::ThumbIp => "thumb-ip",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMcp => "index-mcp",
            Self::IndexPip => "index-pip",
            Self::IndexDip => "index-dip",
            Self::IndexTip => "index-tip",
            Self::MiddleMcp => "middle-mcp",
            Self::MiddlePip => "middle-pip",
            Self::MiddleDip => "middle-dip",
            Self::MiddleTip => "middle-tip",
            Self::RingMcp => "ring-mcp",
            Self::RingPip => "ring-pip",
            Self::RingDip => "ring-dip",
            Self::RingTip => "ring-tip",
            Self::PinkyMcp => "pinky-mcp",
            Self::PinkyPip => "pinky-pip",
            Self::PinkyDip => "pinky-dip",
            Self::PinkyTip => "pinky-tip",
        }
    }
}

// ── Points ─────────────────────────────────────────────────

/// A point in the estimator's image plane (pixels or normalized units).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is read as a vector.
    pub fn norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// A world-space point, carried through for the renderer only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

// ── Hand frame ─────────────────────────────────────────────

/// Landmarks for one detected hand in one video frame.
///
/// The 21-point count is part of the type.  Building a frame from an
/// arbitrarily sized slice goes through [`HandFrame::from_points`], which
/// rejects anything else: a wrong count is an upstream contract violation,
/// never a recoverable runtime case.
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    points: [Point2D; LANDMARK_COUNT],
    world: Option<[Point3D; LANDMARK_COUNT]>,
}

impl HandFrame {
    /// Create a frame from exactly 21 image-plane points.
    pub fn new(points: [Point2D; LANDMARK_COUNT]) -> Self {
        Self {
            points,
            world: None,
        }
    }

    /// Build a frame from a slice, failing fast on a wrong landmark count.
    pub fn from_points(points: &[Point2D]) -> anyhow::Result<Self> {
        let Ok(points) = <[Point2D; LANDMARK_COUNT]>::try_from(points) else {
            bail!(
                "hand frame needs {} landmarks, got {}",
                LANDMARK_COUNT,
                points.len()
            );
        };
        Ok(Self::new(points))
    }

    /// Attach the parallel world-space landmarks.
    pub fn with_world(mut self, world: [Point3D; LANDMARK_COUNT]) -> Self {
        self.world = Some(world);
        self
    }

    /// Attach world-space landmarks from a slice, failing fast on a wrong count.
    pub fn with_world_points(self, world: &[Point3D]) -> anyhow::Result<Self> {
        let Ok(world) = <[Point3D; LANDMARK_COUNT]>::try_from(world) else {
            bail!(
                "world landmarks need {} points, got {}",
                LANDMARK_COUNT,
                world.len()
            );
        };
        Ok(self.with_world(world))
    }

    /// Image-plane position of a landmark.
    pub fn point(&self, landmark: Landmark) -> Point2D {
        self.points[landmark.index()]
    }

    /// All image-plane points in index order.
    pub fn points(&self) -> &[Point2D; LANDMARK_COUNT] {
        &self.points
    }

    /// World-space landmarks, if the estimator supplied them.
    pub fn world(&self) -> Option<&[Point3D; LANDMARK_COUNT]> {
        self.world.as_ref()
    }

    /// Copy of this frame with every image-plane point shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let mut points = self.points;
        for p in &mut points {
            p.x += dx;
            p.y += dy;
        }
        Self {
            points,
            world: self.world,
        }
    }
}
