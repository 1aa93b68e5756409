use winit::window::{Window, WindowId};

use crate::anim::Scheduler;
use crate::device::Gpu;
use crate::input::InputState;

/// Per-window handles and immutable window metadata.
#[derive(Copy, Clone)]
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys  = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Context passed to `core::App::on_input`.
pub struct InputCtx<'a> {
    pub window: WindowCtx<'a>,
    pub input:  &'a InputState,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
///
/// Fields are public so an app can borrow them independently, e.g. the GPU for
/// its renderer while handing the scheduler to the animation loop.
pub struct FrameCtx<'a, 'w> {
    pub window:    WindowCtx<'a>,
    pub gpu:       &'a mut Gpu<'w>,
    pub input:     &'a InputState,
    pub scheduler: &'a mut dyn Scheduler,
}
