use crate::anim::Scheduler;
use crate::input::InputEvent;

use super::ctx::{FrameCtx, InputCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime never redraws on its own: a frame is delivered only after the
/// application asked for one through the [`Scheduler`] it is handed.
pub trait App {
    /// Called once, after the window and GPU are ready.
    fn on_start(&mut self, scheduler: &mut dyn Scheduler) -> AppControl;

    /// Called for every translated input event, after `ctx.input` was updated.
    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called once per scheduled frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
