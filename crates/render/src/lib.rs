//! Rendering adapter: everything a backend needs to draw a frame, computed
//! without touching the GPU.
//!
//! # Invariants
//! - Renderers read the simulation; they never move the camera.
//! - Render targets are at least 1x1 pixels.
//! - The ray matrix always maps the longer screen axis to [-1, 1].

mod frame;
mod post;
mod renderer;
mod stats;

pub use frame::{FrameUniforms, RayMatrix, ResolutionScale, Viewport};
pub use post::{FilmClock, gaussian_kernel};
pub use renderer::{DebugTextRenderer, Renderer};
pub use stats::FrameStats;
