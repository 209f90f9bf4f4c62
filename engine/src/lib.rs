//! Real-time hand gesture classification from 21-point hand landmarks.
//!
//! One [`GestureEngine`] per tracked hand.  Feed it one
//! [`HandFrame`](hand::HandFrame) (or `None` when no hand is visible) per
//! video frame and it returns a [`GestureState`] with the current and
//! previous gesture, how long the current one has been held, and the
//! smoothed palm velocity.

pub mod gesture;
pub mod hand;
pub mod ipc;

pub use gesture::{GestureConfig, GestureEngine, GestureLabel, GestureState};
pub use hand::{HandFrame, Landmark, Point2D};
