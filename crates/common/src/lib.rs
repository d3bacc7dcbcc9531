//! Shared value types: spheres, rings, the camera pose and the galaxy selector.

pub mod types;

pub use types::{CameraPose, Galaxy, Ring, Sphere};
