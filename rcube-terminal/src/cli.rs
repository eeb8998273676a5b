/// Command line options
use clap::{value_parser, Parser};
use log::LevelFilter;
use rcube_core::geometry::DEFAULT_SCALE;
use rcube_core::scene::DEFAULT_THETA;
use rcube_core::{RenderMode, SceneConfig};
use std::path::PathBuf;

/// Largest accepted surface width or height
pub const MAX_DIMENSION: u32 = 8192;

/// Largest accepted cube half edge
pub const MAX_SCALE: f32 = 10_000.0;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rcube",
    version,
    about = "A tumbling cube drawn with the painter's algorithm",
    long_about = "Renders a rotating cube in the terminal. Faces are depth sorted and \
                  shaded by depth; press q, Esc or Ctrl-C to quit."
)]
pub struct Cli {
    /// Width of the drawing surface, in pixels
    #[arg(long, default_value_t = 800, value_parser = value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    pub width: u32,

    /// Height of the drawing surface, in pixels
    #[arg(long, default_value_t = 800, value_parser = value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    pub height: u32,

    /// Half edge length of the cube
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = parse_scale)]
    pub scale: f32,

    /// Rotation about each axis per frame, in radians
    #[arg(
        long,
        default_value_t = DEFAULT_THETA,
        allow_negative_numbers = true,
        value_parser = parse_finite
    )]
    pub theta: f32,

    /// What to draw: faces, edges or points
    #[arg(short, long, default_value_t = RenderMode::Faces)]
    pub mode: RenderMode,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Write logs to this file (the terminal is busy drawing)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Cli {
    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            width: self.width,
            height: self.height,
            scale: self.scale,
            theta: self.theta,
            mode: self.mode,
            ..SceneConfig::default()
        }
    }
}

fn parse_finite(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{s} is not a finite number"))
    }
}

fn parse_scale(s: &str) -> Result<f32, String> {
    let scale = parse_finite(s)?;
    if scale > 0.0 && scale <= MAX_SCALE {
        Ok(scale)
    } else {
        Err(format!("scale must be in (0, {MAX_SCALE}]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["rcube"]).unwrap();
        assert_eq!(cli.scene_config(), SceneConfig::default());
        assert_eq!(cli.fps, 60);
        assert!(cli.log_file.is_none());
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "rcube",
            "--width",
            "640",
            "--height",
            "480",
            "--mode",
            "edges",
            "--theta",
            "-0.01",
            "--log-file",
            "rcube.log",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = cli.scene_config();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.mode, RenderMode::Edges);
        assert_eq!(config.theta, -0.01);
        assert_eq!(cli.log_file, Some(PathBuf::from("rcube.log")));
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["rcube", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["rcube", "--mode", "wireframe"]).is_err());
        assert!(Cli::try_parse_from(["rcube", "--fps", "0"]).is_err());
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        for value in ["NaN", "inf", "-inf", "0", "-40", "1e20"] {
            assert!(
                Cli::try_parse_from(["rcube", "--scale", value]).is_err(),
                "--scale {value} accepted"
            );
        }
        for value in ["NaN", "inf", "-inf"] {
            assert!(
                Cli::try_parse_from(["rcube", "--theta", value]).is_err(),
                "--theta {value} accepted"
            );
        }
        let cli = Cli::try_parse_from(["rcube", "--scale", "12.5", "--theta", "-0.5"]).unwrap();
        assert_eq!(cli.scale, 12.5);
        assert_eq!(cli.theta, -0.5);
    }

    #[test]
    fn test_caps_surface_size() {
        assert!(Cli::try_parse_from(["rcube", "--width", "8193"]).is_err());
        assert!(Cli::try_parse_from(["rcube", "--height", "4000000000"]).is_err());
        let cli = Cli::try_parse_from(["rcube", "--width", "8192", "--height", "1"]).unwrap();
        assert_eq!((cli.width, cli.height), (MAX_DIMENSION, 1));
    }
}
