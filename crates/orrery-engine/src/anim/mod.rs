//! Time-driven animation core.
//!
//! Converts elapsed time into absolute per-body angles, applies the global rate
//! multiplier and keeps the FPS estimate. Everything host-specific (scene graph,
//! renderer, FPS readout, frame scheduling) is reached through the traits in this
//! module, so the loop can be driven by the winit runtime or by hand in tests.

mod body;
mod rate;
mod scheduler;
mod update_loop;

pub use body::{
    orbit_angle, Axis, BodyRegistry, NodeHandle, OrbitingBody, RegistryError, SceneGraph,
};
pub use rate::{RateController, RATE_DEFAULT, RATE_MAX, RATE_MIN};
pub use scheduler::{Scheduler, StopToken};
pub use update_loop::{
    FpsDisplay, FrameIo, LoopControl, LoopError, LoopState, Renderer, UpdateLoop,
};
