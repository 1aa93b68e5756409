use std::fmt;

use crate::time::{Clock, FrameStatsTracker, MonotonicClock};

use super::body::{BodyRegistry, SceneGraph};
use super::rate::RateController;
use super::scheduler::{Scheduler, StopToken};

/// Draws the current scene state. The loop only cares whether it failed.
pub trait Renderer<S: ?Sized> {
    fn render(&mut self, scene: &S) -> anyhow::Result<()>;
}

/// Heads-up FPS readout.
pub trait FpsDisplay {
    fn show_fps(&mut self, fps: u32);
}

/// Collaborators borrowed for the duration of one frame.
pub struct FrameIo<'a, S: ?Sized> {
    pub scene: &'a mut S,
    pub renderer: &'a mut dyn Renderer<S>,
    pub display: &'a mut dyn FpsDisplay,
    pub scheduler: &'a mut dyn Scheduler,
}

/// Lifecycle of an [`UpdateLoop`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Constructed, `start` not called yet.
    Idle,
    /// Frames are being scheduled.
    Running,
    /// Stopped on request; terminal.
    Stopped,
    /// An iteration failed; terminal.
    Halted,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Halted => "halted",
        };
        f.write_str(s)
    }
}

/// Outcome of a successful `frame` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    /// Frame completed and the next one was scheduled.
    Continue,
    /// A stop was requested; nothing was drawn and nothing scheduled.
    Stopped,
}

#[derive(Debug)]
pub enum LoopError {
    AlreadyStarted,
    NotRunning(LoopState),
    /// The renderer failed; the loop is now halted.
    Render(anyhow::Error),
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "animation loop already started"),
            Self::NotRunning(state) => write!(f, "animation loop is {state}, not running"),
            Self::Render(err) => write!(f, "render failed: {err:#}"),
        }
    }
}

impl std::error::Error for LoopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(&**err),
            _ => None,
        }
    }
}

/// Per-frame animation driver.
///
/// Time is measured from `start`, not from construction: whatever happens in
/// between (window creation, GPU init) does not advance the bodies or count
/// against the first FPS window.
///
/// Owns everything the animation needs between frames: the clock, the body table,
/// the rate multiplier and the FPS window. Scene, renderer, display and scheduler
/// are borrowed per frame through [`FrameIo`], so the loop holds no reference to
/// the host.
///
/// Each iteration:
/// 1. writes every body's absolute angle (`elapsed * base_rate * multiplier`)
/// 2. ticks the FPS window and publishes a reading when it closes
/// 3. renders
/// 4. schedules the next frame
pub struct UpdateLoop<C: Clock = MonotonicClock> {
    clock: C,
    /// Clock reading at `start`; frame timestamps are relative to it.
    origin: f64,
    bodies: BodyRegistry,
    rate: RateController,
    stats: FrameStatsTracker,
    state: LoopState,
    stop: StopToken,
    frame_index: u64,
}

impl UpdateLoop<MonotonicClock> {
    /// Creates a loop timed by the wall clock.
    pub fn new(bodies: BodyRegistry) -> Self {
        Self::with_clock(MonotonicClock::new(), bodies)
    }
}

impl<C: Clock> UpdateLoop<C> {
    pub fn with_clock(clock: C, bodies: BodyRegistry) -> Self {
        Self {
            clock,
            origin: 0.0,
            bodies,
            rate: RateController::new(),
            stats: FrameStatsTracker::new(0.0),
            state: LoopState::Idle,
            stop: StopToken::new(),
            frame_index: 0,
        }
    }

    /// Replaces the initial rate controller.
    pub fn with_rate(mut self, rate: RateController) -> Self {
        self.rate = rate;
        self
    }

    /// Enters `Running` and requests the first frame. Valid exactly once.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> Result<(), LoopError> {
        if self.state != LoopState::Idle {
            return Err(LoopError::AlreadyStarted);
        }

        self.origin = self.clock.elapsed_seconds();
        self.stats = FrameStatsTracker::new(0.0);
        self.state = LoopState::Running;
        log::info!(
            "animation loop started ({} bodies, rate x{})",
            self.bodies.len(),
            self.rate.multiplier()
        );
        scheduler.schedule_next();
        Ok(())
    }

    /// Runs one iteration.
    pub fn frame<S>(&mut self, io: FrameIo<'_, S>) -> Result<LoopControl, LoopError>
    where
        S: SceneGraph + ?Sized,
    {
        if self.state != LoopState::Running {
            return Err(LoopError::NotRunning(self.state));
        }

        if self.stop.is_stop_requested() {
            self.state = LoopState::Stopped;
            log::info!("animation loop stopped after {} frames", self.frame_index);
            return Ok(LoopControl::Stopped);
        }

        let elapsed = (self.clock.elapsed_seconds() - self.origin).max(0.0);
        let multiplier = self.rate.multiplier();

        self.bodies.apply(&mut *io.scene, elapsed, multiplier);

        if let Some(fps) = self.stats.tick(elapsed * 1000.0) {
            log::debug!("fps {fps}");
            io.display.show_fps(fps);
        }

        if let Err(err) = io.renderer.render(&*io.scene) {
            self.state = LoopState::Halted;
            log::error!("animation loop halted at frame {}: {err:#}", self.frame_index);
            return Err(LoopError::Render(err));
        }

        self.frame_index += 1;
        io.scheduler.schedule_next();

        Ok(LoopControl::Continue)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Handle that ends the loop at the start of its next frame.
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn rate(&self) -> &RateController {
        &self.rate
    }

    /// The only write path for the multiplier; input handlers go through here.
    pub fn rate_mut(&mut self) -> &mut RateController {
        &mut self.rate
    }

    pub fn stats(&self) -> &FrameStatsTracker {
        &self.stats
    }

    /// Number of frames that completed and rescheduled.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}
