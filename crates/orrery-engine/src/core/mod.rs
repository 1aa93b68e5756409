//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application, and the contexts handed to each callback.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InputCtx, WindowCtx};
