use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Host capability to run the loop again on the next display refresh.
///
/// The loop asks for its own next frame at the end of every iteration; the host
/// decides when that is (vsync, a timer, or a test calling `frame` by hand).
/// Hosts must serialize invocations: a new frame never starts while one is running.
pub trait Scheduler {
    fn schedule_next(&mut self);
}

/// Cloneable request to stop an animation loop.
///
/// The request is observed at the start of the next frame; the frame in flight
/// (if any) completes normally.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    requested: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_request() {
        let token = StopToken::new();
        let other = token.clone();
        assert!(!token.is_stop_requested());

        other.request_stop();
        assert!(token.is_stop_requested());
    }
}
