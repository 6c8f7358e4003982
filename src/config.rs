use clap::Parser;

use crate::geometry::{DEFAULT_SEGMENTS, MAX_SEGMENTS, MIN_SEGMENTS};
use crate::scene::DemoKind;

/// Small real-time demos built from cubes, a pyramid and a procedural cylinder.
#[derive(Parser, Debug)]
#[command(name = "shapes3d", version)]
pub struct Cli {
    /// Demo to show first
    #[arg(long, value_enum, default_value_t = DemoKind::Shapes)]
    pub demo: DemoKind,

    /// Cylinder segment count (3..=128)
    #[arg(
        long,
        default_value_t = DEFAULT_SEGMENTS,
        value_parser = clap::value_parser!(u32).range(MIN_SEGMENTS as i64..=MAX_SEGMENTS as i64)
    )]
    pub segments: u32,

    /// Initial window width
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Start with vsync on
    #[arg(long)]
    pub vsync: bool,

    /// Log filter, env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Record one frame of the demo without a window, log it and exit
    #[arg(long)]
    pub dump_frame: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub demo: DemoKind,
    pub segments: u32,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub dump_frame: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo: DemoKind::Shapes,
            segments: DEFAULT_SEGMENTS,
            width: 1280,
            height: 720,
            vsync: false,
            dump_frame: false,
        }
    }
}

impl AppConfig {
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            demo: cli.demo,
            segments: cli.segments,
            width: cli.width,
            height: cli.height,
            vsync: cli.vsync,
            dump_frame: cli.dump_frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let cli = Cli::parse_from(["shapes3d"]);
        assert_eq!(AppConfig::from(&cli), AppConfig::default());
        assert!(cli.log_filter.is_none());
    }

    #[test]
    fn parses_every_flag() {
        let cli = Cli::parse_from([
            "shapes3d",
            "--demo",
            "robot",
            "--segments",
            "8",
            "--width",
            "800",
            "--height",
            "600",
            "--vsync",
            "--dump-frame",
            "--log-filter",
            "debug",
        ]);
        let config = AppConfig::from(&cli);

        assert_eq!(config.demo, DemoKind::Robot);
        assert_eq!(config.segments, 8);
        assert_eq!(config.aspect(), 800.0 / 600.0);
        assert!(config.vsync);
        assert!(config.dump_frame);
        assert_eq!(cli.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn segments_outside_slider_range_are_rejected() {
        assert!(Cli::try_parse_from(["shapes3d", "--segments", "2"]).is_err());
        assert!(Cli::try_parse_from(["shapes3d", "--segments", "129"]).is_err());

        let low = Cli::parse_from(["shapes3d", "--segments", "3"]);
        let high = Cli::parse_from(["shapes3d", "--segments", "128"]);
        assert_eq!(low.segments, MIN_SEGMENTS);
        assert_eq!(high.segments, MAX_SEGMENTS);
    }

    #[test]
    fn rejects_unknown_demo() {
        assert!(Cli::try_parse_from(["shapes3d", "--demo", "teapot"]).is_err());
    }
}
