//! Camera controls: keyboard/pointer fly controls, tablet orientation/touch
//! controls, and the router that decides which one is live.
//!
//! # Invariants
//! - Controls consume [`Action`]s and plain samples, never windowing events.
//! - Tablet controls start disconnected; a keypress always disconnects them.
//! - Only the first orientation sample with a heading connects tablet controls.

pub mod action;
pub mod fly;
pub mod router;
pub mod tablet;

pub use action::{Action, PointerButton};
pub use fly::FlyControls;
pub use router::InputRouter;
pub use tablet::{DeviceOrientation, TabletControls, device_quaternion};
