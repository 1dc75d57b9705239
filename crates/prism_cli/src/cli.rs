use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "Render spheres over a checkerboard with a recursive ray tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Environment map image (PNG or JPEG) sampled by escaped rays
    #[arg(short, long)]
    pub envmap: Option<PathBuf>,

    /// JSON scene description; the built-in scene is used when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Maximum reflection/refraction depth (ray count doubles per level)
    #[arg(
        long,
        default_value_t = prism_renderer::MAX_DEPTH,
        value_parser = clap::value_parser!(u32).range(0..=16)
    )]
    pub max_depth: u32,

    /// Field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    pub fov: f32,

    /// Make the checkerboard floor extend forever
    #[arg(long, conflicts_with = "no_floor")]
    pub infinite_floor: bool,

    /// Remove the checkerboard floor
    #[arg(long)]
    pub no_floor: bool,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
