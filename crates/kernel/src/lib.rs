//! Simulation kernel: scene configuration, the wormhole crossing and the
//! per-frame camera step.
//!
//! # Invariants
//! - The galaxy selector flips exactly once per wormhole crossing.
//! - After a crossing the camera is outside the wormhole, opposite its approach.
//! - All camera motion flows through [`Simulation::advance`].

pub mod config;
pub mod scene;
pub mod simulation;
pub mod wormhole;

pub use config::{
    AppConfig, BloomSettings, ConfigError, ControlsConfig, DisplayConfig, FilmSettings,
    PostConfig, RESOLUTION_PRESETS,
};
pub use scene::SceneConfig;
pub use simulation::{CameraControls, SimEvent, Simulation};
pub use wormhole::{Crossing, EXIT_MARGIN, crossing_point, traverse};
