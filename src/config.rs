//! Configuration management for the G-code imager.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML configuration file (explicit path or user config dir)
//! - Input path resolution

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::parser::ParseOptions;
use crate::render::{FrameWriter, JsonWriter, XyzWriter};

/// Output encoding for traced frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Xyz,
}

impl OutputFormat {
    pub fn writer(self) -> Box<dyn FrameWriter> {
        match self {
            OutputFormat::Json => Box::new(JsonWriter { pretty: true }),
            OutputFormat::Xyz => Box::new(XyzWriter),
        }
    }
}

/// Command-line arguments for the G-code imager
#[derive(Debug, Parser)]
#[command(name = "gcode-imager")]
#[command(about = "Trace G-code into toolpath points for rendering")]
#[command(version)]
pub struct Args {
    /// G-code file to trace
    pub input: PathBuf,

    /// Directory the input path is relative to (defaults to the working directory)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Emit an animation of this many progressive frames
    #[arg(long)]
    pub frames: Option<usize>,

    /// Fraction of moves to trace for a single frame (0.0 to 1.0)
    #[arg(long, conflicts_with = "frames")]
    pub fraction: Option<f64>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/gcode-imager/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Treat `;=` lines as separators instead of comments
    #[arg(long)]
    pub strict_separators: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Settings accepted from the TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub render: RenderSection,
    pub parser: ParserSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub frames: Option<usize>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserSection {
    pub strict_separators: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Fully resolved input path
    pub input: PathBuf,
    /// `Some(n)` for an animation of `n` frames, `None` for one frame
    pub frames: Option<usize>,
    /// Fraction used when emitting a single frame
    pub fraction: f64,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub parse_options: ParseOptions,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            },
        };

        let base_dir = match args.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to read working directory")?,
        };

        if args.frames.is_some() && args.fraction.is_some() {
            bail!("--frames and --fraction cannot be used together");
        }

        // An explicit single-frame fraction overrides an animation set in the file
        let frames = match args.fraction {
            Some(_) => None,
            None => args.frames.or(file.render.frames),
        };
        if frames == Some(0) {
            bail!("--frames must be at least 1");
        }

        let fraction = args.fraction.unwrap_or(1.0);
        if !(0.0..=1.0).contains(&fraction) {
            bail!("--fraction must be between 0.0 and 1.0, got {}", fraction);
        }

        Ok(Config {
            input: base_dir.join(args.input),
            frames,
            fraction,
            format: args.format.or(file.render.format).unwrap_or_default(),
            output: args.output,
            parse_options: ParseOptions {
                strict_separators: args.strict_separators || file.parser.strict_separators,
            },
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// `<config dir>/gcode-imager/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gcode-imager").join("config.toml"))
}
