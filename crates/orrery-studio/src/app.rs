use winit::window::Window;

use orrery_engine::anim::{
    FpsDisplay, FrameIo, LoopControl, LoopState, Renderer, Scheduler, UpdateLoop,
};
use orrery_engine::core::{App, AppControl, FrameCtx, InputCtx, WindowCtx};
use orrery_engine::device::Gpu;
use orrery_engine::input::{InputEvent, Key, KeyState, RateSlider};

use crate::scene::Scene;

/// Window title with the FPS readout appended.
pub fn fps_title(base: &str, fps: u32) -> String {
    format!("{base} · {fps} FPS")
}

/// Clears and presents the window surface. Meshes are not drawn.
struct SurfaceRenderer<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    window: &'a Window,
}

impl Renderer<Scene> for SurfaceRenderer<'_, '_> {
    fn render(&mut self, scene: &Scene) -> anyhow::Result<()> {
        if log::log_enabled!(log::Level::Trace) {
            for node in &scene.nodes {
                log::trace!("{} {:?}", node.name, node.rotation);
            }
        }
        self.gpu.clear_frame(self.window, scene.background)
    }
}

/// FPS panel rendered into the window title.
struct TitleDisplay<'a> {
    window: WindowCtx<'a>,
    base: &'a str,
}

impl FpsDisplay for TitleDisplay<'_> {
    fn show_fps(&mut self, fps: u32) {
        self.window.set_title(&fps_title(self.base, fps));
    }
}

pub struct OrreryApp {
    title: String,
    scene: Scene,
    anim: UpdateLoop,
    slider: RateSlider,
}

impl OrreryApp {
    pub fn new(title: impl Into<String>, scene: Scene, anim: UpdateLoop) -> Self {
        let slider = RateSlider::new().value(anim.rate().multiplier());
        Self { title: title.into(), scene, anim, slider }
    }
}

impl App for OrreryApp {
    fn on_start(&mut self, scheduler: &mut dyn Scheduler) -> AppControl {
        match self.anim.start(scheduler) {
            Ok(()) => AppControl::Continue,
            Err(err) => {
                log::error!("{err}");
                AppControl::Exit
            }
        }
    }

    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        if let InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. } = event {
            // A halted loop never reaches its next frame, so leave directly.
            if self.anim.state() != LoopState::Running {
                return AppControl::Exit;
            }
            self.anim.stop_token().request_stop();
            return AppControl::Continue;
        }

        let (width, _) = ctx.window.logical_size();
        if let Some(v) = self.slider.handle(event, ctx.input, width) {
            let applied = self.anim.rate_mut().set_multiplier(v);
            log::info!("speed x{applied:.1}");
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let window = ctx.window;
        let mut renderer = SurfaceRenderer { gpu: &mut *ctx.gpu, window: window.window };
        let mut display = TitleDisplay { window, base: &self.title };

        let result = self.anim.frame(FrameIo {
            scene: &mut self.scene,
            renderer: &mut renderer,
            display: &mut display,
            scheduler: &mut *ctx.scheduler,
        });

        match result {
            Ok(LoopControl::Continue) => AppControl::Continue,
            Ok(LoopControl::Stopped) => AppControl::Exit,
            Err(err) => {
                // The loop has already logged the failure and stopped scheduling;
                // the last frame stays on screen until the window is closed.
                log::debug!("frame rejected: {err}");
                AppControl::Continue
            }
        }
    }
}
