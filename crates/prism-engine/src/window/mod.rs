//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single demo window, and wires them to
//! the GPU layer and the app lifecycle.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
