//! Prism engine crate.
//!
//! This crate owns the platform + GPU runtime pieces shared by the demos:
//! the window loop, device/surface management, input translation, frame
//! timing, asynchronous file fetching, a debug-text overlay and an orbit
//! camera.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
pub mod fetch;
pub mod text;
pub mod camera;
