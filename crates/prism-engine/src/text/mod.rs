//! Fixed-grid debug text overlay.

mod debug_text;
mod font;

pub use debug_text::{DebugText, CELL_SIZE};
pub use font::{DebugFont, FontLoadError};
