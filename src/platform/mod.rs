//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (wall clock vs. scripted clock for tests)
//! - Input events (keys, pointer, touch, on-screen buttons)

pub mod input;
pub mod time;

pub use input::{Command, KeyCode, RawInput, dispatch};
pub use time::{Clock, ManualClock, SystemClock};
