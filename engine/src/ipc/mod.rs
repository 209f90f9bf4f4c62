//! Line-oriented s-expression protocol for driving an engine from outside
//! the process: one request per line in, one response per line out.

pub mod dispatch;

pub use dispatch::{format_frame, handle_message};
