//! GPU device + surface management.
//!
//! Creates the wgpu device/queue for a window, keeps the swapchain configured
//! across resizes and hands out one frame at a time.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
