use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::anim::Scheduler;
use crate::core::{App as CoreApp, AppControl, FrameCtx, InputCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "orrery".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Hosts a single window. Frames are delivered only when the application asked
/// for one; each `RedrawRequested` runs exactly one `on_frame`.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

/// Holds back redraw requests while the surface has no area.
///
/// A minimized window presents nothing, so redrawing it would only spin the
/// CPU. The pending request is released by the next non-empty resize.
#[derive(Debug, Default)]
struct RedrawGate {
    parked: bool,
}

impl RedrawGate {
    /// Whether a request made while the surface is `size` goes through now.
    fn admit(&mut self, size: PhysicalSize<u32>) -> bool {
        if is_empty(size) {
            self.parked = true;
            return false;
        }
        true
    }

    /// Whether a resize to `size` releases a parked request.
    fn resume(&mut self, size: PhysicalSize<u32>) -> bool {
        if self.parked && !is_empty(size) {
            self.parked = false;
            return true;
        }
        false
    }
}

fn is_empty(size: PhysicalSize<u32>) -> bool {
    size.width == 0 || size.height == 0
}

/// [`Scheduler`] backed by the window's redraw request.
///
/// winit coalesces repeated requests, so asking twice before the next redraw
/// still yields one frame.
struct RedrawScheduler<'a> {
    window: &'a Window,
    size: PhysicalSize<u32>,
    gate: &'a mut RedrawGate,
}

impl Scheduler for RedrawScheduler<'_> {
    fn schedule_next(&mut self) {
        if self.gate.admit(self.size) {
            self.window.request_redraw();
        } else {
            log::trace!("redraw parked until the window has an area again");
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    input: InputState,
    redraw: RedrawGate,
    started: bool,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            input: InputState::default(),
            redraw: RedrawGate::default(),
            started: false,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        self.entry = Some(entry);
        Ok(())
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit(event_loop);
            return;
        }

        if self.started {
            return;
        }
        self.started = true;

        let (app, entry, redraw) = (&mut self.app, &self.entry, &mut self.redraw);
        let control = entry
            .as_ref()
            .map(|entry| {
                entry.with_window(|window| {
                    app.on_start(&mut RedrawScheduler {
                        window,
                        size: window.inner_size(),
                        gate: redraw,
                    })
                })
            })
            .unwrap_or(AppControl::Exit);

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Redraws come from the app's own schedule requests, never from here.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, input, entry, redraw) =
            (&mut self.app, &mut self.input, &mut self.entry, &mut self.redraw);

        let Some(entry) = entry.as_mut() else {
            return;
        };

        let mut control = AppControl::Continue;

        if let Some(ev) = entry.with_window(|w| translate_input_event(w, &event)) {
            input.apply_event(&ev);
            entry.with_window(|window| {
                let mut ctx = InputCtx {
                    window: WindowCtx { id: window_id, window },
                    input: &*input,
                };
                control = app.on_input(&mut ctx, &ev);
            });
        }

        match &event {
            WindowEvent::CloseRequested => {
                control = AppControl::Exit;
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                if redraw.resume(*new_size) {
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                if redraw.resume(new_size) {
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested if control == AppControl::Continue => {
                entry.with_mut(|fields| {
                    let mut scheduler = RedrawScheduler {
                        window: fields.window,
                        size: fields.gpu.size(),
                        gate: redraw,
                    };
                    let mut ctx = FrameCtx {
                        window: WindowCtx { id: window_id, window: fields.window },
                        gpu: fields.gpu,
                        input: &*input,
                        scheduler: &mut scheduler,
                    };
                    control = app.on_frame(&mut ctx);
                });
            }

            _ => {}
        }

        if control == AppControl::Exit {
            // Drop the surface before the window goes away.
            self.entry = None;
            self.request_exit(event_loop);
        }
    }
}

fn translate_input_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: match state {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            },
        }),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            repeat: event.repeat,
        }),

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let scale = window.scale_factor();
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Space => Key::Space,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            // `=` shares the key with `+` on most layouts.
            KeyCode::Equal | KeyCode::NumpadAdd => Key::Plus,
            KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,

            KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
            KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
            KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,

            _ => Key::Other,
        },

        PhysicalKey::Unidentified(_) => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_admits_while_visible() {
        let mut gate = RedrawGate::default();
        assert!(gate.admit(PhysicalSize::new(800, 600)));
        assert!(!gate.resume(PhysicalSize::new(1024, 768)));
    }

    #[test]
    fn minimized_parks_until_restored() {
        let mut gate = RedrawGate::default();
        assert!(!gate.admit(PhysicalSize::new(0, 0)));
        assert!(!gate.resume(PhysicalSize::new(0, 0)));
        assert!(!gate.resume(PhysicalSize::new(800, 0)));
        assert!(gate.resume(PhysicalSize::new(800, 600)));
        // Released once.
        assert!(!gate.resume(PhysicalSize::new(800, 600)));
    }
}
