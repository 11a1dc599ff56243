//! Cubemap skybox loaded from six JPEG faces.
//!
//! The faces are fetched in parallel, decoded on arrival and uploaded as one
//! cube texture once all six are in. Until then a black placeholder cube is
//! drawn and the overlay reports progress.

pub mod cli;
pub mod face;
pub mod loader;
pub mod scene;

pub use face::{CubeFace, FaceBuffer};
pub use loader::{CubemapLoader, LoadStatus};
pub use scene::{overlay_font, CubemapApp, CubemapConfig};
