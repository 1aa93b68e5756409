mod app;
mod cli;
mod scene;

use anyhow::Result;
use clap::Parser;

use orrery_engine::anim::{RateController, UpdateLoop};
use orrery_engine::device::GpuInit;
use orrery_engine::logging::{init_logging, LoggingConfig};
use orrery_engine::window::{Runtime, RuntimeConfig};

use crate::app::{fps_title, OrreryApp};
use crate::cli::Cli;
use crate::scene::SceneKind;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &cli.log {
        logging = logging.with_filter(filter);
    }
    init_logging(logging);

    let title = match cli.scene {
        SceneKind::Cube => "Orrery · cube",
        SceneKind::Solar => "Orrery · solar system",
    };

    let (scene, bodies) = scene::build(cli.scene)?;
    let anim = UpdateLoop::new(bodies).with_rate(RateController::with_multiplier(cli.rate));
    log::info!(
        "{:?} scene, speed x{:.1} (arrows, +/-, 1-3 or drag to change; Esc quits)",
        cli.scene,
        anim.rate().multiplier()
    );

    let config = RuntimeConfig {
        title: fps_title(title, 0),
        ..RuntimeConfig::default()
    };

    let gpu_init = GpuInit {
        present_mode: if cli.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::Fifo
        },
        ..GpuInit::default()
    };

    Runtime::run(config, gpu_init, OrreryApp::new(title, scene, anim))
}
