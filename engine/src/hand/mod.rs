//! Hand landmark model and the geometry the classifier is built on.
//!
//! - `landmarks`: 21-point `HandFrame`, `Landmark` roles, point types
//! - `geometry`: distances, palm center, finger-extension tests

pub mod geometry;
pub mod landmarks;

#[cfg(test)]
pub(crate) mod fixtures;

pub use geometry::{distance, palm_center, Finger, FingerStates};
pub use landmarks::{HandFrame, Landmark, Point2D, Point3D, LANDMARK_COUNT};
