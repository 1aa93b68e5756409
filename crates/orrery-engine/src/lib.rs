//! Orrery engine crate.
//!
//! The animation core (`anim`, `time`) is host-independent. `window`, `device`
//! and `input` provide the winit/wgpu host that drives it on a desktop.

pub mod anim;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;
