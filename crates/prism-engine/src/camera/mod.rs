//! Orbiting look-at camera driven by mouse input.

mod orbit;

pub use orbit::{CameraDesc, OrbitCamera};
