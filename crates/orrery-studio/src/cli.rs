use clap::Parser;

use crate::scene::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "orrery")]
#[command(about = "Rotating cube / toy solar system driven by elapsed time", long_about = None)]
pub struct Cli {
    /// Scene to animate
    #[arg(long, value_enum, default_value_t = SceneKind::Solar)]
    pub scene: SceneKind,

    /// Initial speed multiplier, clamped to 0.1..=3.0
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub rate: f32,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,

    /// Present without waiting for vblank
    #[arg(long = "no-vsync", default_value = "false")]
    pub no_vsync: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["orrery"]).unwrap();
        assert_eq!(cli.scene, SceneKind::Solar);
        assert_eq!(cli.rate, 1.0);
        assert!(cli.log.is_none());
        assert!(!cli.no_vsync);
    }

    #[test]
    fn scene_and_rate() {
        let cli = Cli::try_parse_from(["orrery", "--scene", "cube", "--rate", "2.5"]).unwrap();
        assert_eq!(cli.scene, SceneKind::Cube);
        assert_eq!(cli.rate, 2.5);
    }

    #[test]
    fn negative_rate_parses() {
        // Clamping happens in the rate controller, not here.
        let cli = Cli::try_parse_from(["orrery", "--rate", "-5"]).unwrap();
        assert_eq!(cli.rate, -5.0);
    }

    #[test]
    fn unknown_scene_rejected() {
        assert!(Cli::try_parse_from(["orrery", "--scene", "torus"]).is_err());
    }
}
