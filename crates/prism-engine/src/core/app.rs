use anyhow::Result;

use crate::input::InputEvent;
use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application lifecycle implemented by each demo.
///
/// The runtime calls `on_init` once after the window and GPU exist, delivers
/// input through `on_event` before the frame that observes it, calls
/// `on_frame` once per redraw and `on_cleanup` exactly once on shutdown,
/// while the GPU is still alive.
pub trait App {
    /// Creates GPU resources. An error stops the runtime.
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for every translated input event.
    fn on_event(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Releases app-owned subsystems.
    fn on_cleanup(&mut self) {}
}
