//! Time subsystem.
//!
//! Provides elapsed-time sources and frame statistics without coupling to the runtime.
//! Intended usage:
//! - one `Clock` per animation loop, read once per frame
//! - feed the same timestamps (in milliseconds) to a `FrameStatsTracker`

mod clock;
mod frame_stats;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use frame_stats::{FrameStatsTracker, FPS_WINDOW_MS};
