//! Labelprobe: dataset format detection for computer-vision annotations.
//!
//! Labelprobe looks at a directory and works out which annotation format it
//! is in, so that the right importer can be picked without asking the user.
//! Each format declares what evidence proves membership as requirements
//! placed on a detection context; a registry runs every format's detector
//! and ranks the matches by confidence.
//!
//! # Modules
//!
//! - [`detection`]: Requirement primitives, alternation, and the detector dispatcher
//! - [`environment`]: Format registry, detection options, and reports
//! - [`formats`]: Built-in detectors (COCO, VOC, YOLO, Cityscapes, ...)
//! - [`error`]: Error types for labelprobe operations

pub mod detection;
pub mod environment;
pub mod error;
pub mod formats;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use detection::{
    apply_format_detector, DetectResult, DetectionContext, DetectionError,
    FormatDetectionConfidence, FormatDetector, RequirementsUnmet,
};
pub use environment::{DetectOptions, DetectionReport, Environment};
pub use error::LabelprobeError;

/// The labelprobe CLI application.
#[derive(Parser)]
#[command(name = "labelprobe")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log each detector's verdict to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Detect the annotation format of a dataset directory.
    Detect(DetectArgs),
    /// List the formats that can be detected.
    Formats,
}

/// Arguments for the detect subcommand.
#[derive(clap::Args)]
struct DetectArgs {
    /// Dataset root directory.
    path: PathBuf,

    /// Only check this format (repeatable).
    #[arg(long = "only", value_name = "FORMAT")]
    only: Vec<String>,

    /// Never check this format (repeatable).
    #[arg(long = "exclude", value_name = "FORMAT")]
    exclude: Vec<String>,

    /// Ignore matches below this confidence ('low' or 'medium').
    #[arg(long, value_name = "LEVEL")]
    min_confidence: Option<FormatDetectionConfidence>,

    /// Show every requirement each detector checked.
    #[arg(long)]
    explain: bool,

    /// YAML file with default detection options.
    #[arg(long, env = "LABELPROBE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    output: String,
}

impl DetectArgs {
    /// Config file values, overridden by any flags given on the command line.
    fn options(&self) -> Result<DetectOptions, LabelprobeError> {
        let mut opts = match &self.config {
            Some(path) => DetectOptions::from_yaml_file(path)?,
            None => DetectOptions::default(),
        };
        if !self.only.is_empty() {
            opts.only = self.only.clone();
        }
        if !self.exclude.is_empty() {
            opts.exclude = self.exclude.clone();
        }
        if self.min_confidence.is_some() {
            opts.min_confidence = self.min_confidence;
        }
        opts.explain |= self.explain;
        Ok(opts)
    }
}

/// Run the labelprobe CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelprobeError> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Some(Commands::Detect(args)) => run_detect(args),
        Some(Commands::Formats) => {
            run_formats();
            Ok(())
        }
        None => {
            println!("labelprobe {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Dataset format detection for annotation datasets.");
            println!();
            println!("Run 'labelprobe --help' for usage information.");
            Ok(())
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `--debug` forces debug output; otherwise `RUST_LOG` applies, defaulting
/// to info.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("labelprobe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("labelprobe=info"))
    };

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Execute the detect subcommand.
fn run_detect(args: DetectArgs) -> Result<(), LabelprobeError> {
    let opts = args.options()?;
    tracing::debug!("detecting {} with {:?}", args.path.display(), opts);

    let env = Environment::builtin();
    let report = env.detect_report(&args.path, &opts)?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", report),
    }

    let best: Vec<String> = report
        .best_matches()
        .into_iter()
        .map(str::to_string)
        .collect();

    match best.len() {
        0 => Err(LabelprobeError::NoFormatDetected { path: args.path }),
        1 => Ok(()),
        _ => Err(LabelprobeError::AmbiguousFormat {
            path: args.path,
            formats: best,
        }),
    }
}

/// Execute the formats subcommand.
fn run_formats() {
    let env = Environment::builtin();
    for format in env.formats() {
        println!("{:<16} {}", format.name(), format.description());
    }
}
