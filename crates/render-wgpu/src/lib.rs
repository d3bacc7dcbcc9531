//! wgpu render backend for the wormhole flight.
//!
//! Draws the scene with a full-screen raymarch, then bloom and film grain.
//!
//! # Invariants
//! - The renderer reads the simulation; it never moves the camera.
//! - Offscreen targets follow the viewport's scaled size, at least 1x1.
//! - Uniform structs here match their WGSL counterparts byte for byte.

mod bloom;
mod context;
mod error;
mod film;
mod fullscreen;
mod raymarch;
mod renderer;
mod shaders;
mod textures;

pub use context::GpuContext;
pub use error::RenderError;
pub use renderer::WormholeRenderer;
