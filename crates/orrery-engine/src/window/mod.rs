//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and acts
//! as the per-frame scheduler for the application.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
