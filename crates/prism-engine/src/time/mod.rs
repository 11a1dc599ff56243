//! Frame timing.
//!
//! `FrameClock::tick()` is called once per presented frame; animation code
//! reads the smoothed `FrameTime::dt` rather than the raw frame delta.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
