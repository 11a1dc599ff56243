//! Mipmap filtering demo.
//!
//! One procedurally generated 9-level texture is drawn on twelve rotating
//! quads, each sampled through a different sampler configuration.

pub mod cli;
pub mod grid;
pub mod mip_chain;
pub mod samplers;
pub mod scene;

pub use grid::{plan_frame, GridDraw};
pub use mip_chain::MipChain;
pub use samplers::{sampler_configs, Filter, SamplerConfig};
pub use scene::MipmapApp;
