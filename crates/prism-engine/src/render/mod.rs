//! GPU rendering subsystem.
//!
//! Demos own their pipelines and buffers; this module hands them the device
//! context for a frame and the passes to record into.
//!
//! Convention:
//! - one scene pass per frame, cleared per [`PassAction`], multisampled when
//!   the device has an MSAA target
//! - any number of overlay passes afterwards, drawn on the resolved surface

mod ctx;
mod texture;

pub use ctx::{PassAction, RenderCtx, RenderTarget, Viewport};
pub use texture::{create_cube_texture, create_mipmapped_texture, create_placeholder_cube};
