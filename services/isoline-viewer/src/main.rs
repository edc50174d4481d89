//! Headless isoline viewer.
//!
//! Animates a scalar field over a triangulated grid, extracts the isoline
//! at the configured threshold every frame, and either writes each frame
//! to a PNG sequence or only records buffer statistics.

mod config;
mod platform;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use isoline::canvas::{CanvasStyle, PngSequenceSink, StatsSink};
use isoline::{FieldKind, FrameDriver, FrameSink};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{CliOverrides, ViewerSettings};
use platform::HeadlessPlatform;

#[derive(Parser, Debug)]
#[command(name = "isoline-viewer")]
#[command(about = "Animate a scalar field and its isoline without a window")]
struct Args {
    /// Viewer configuration file (YAML)
    #[arg(short, long, env = "ISOLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Field to animate: wave, ramp-x or radial
    #[arg(short, long)]
    field: Option<FieldKind>,

    /// Number of frames to render before exiting
    #[arg(long)]
    frames: Option<u64>,

    /// Seconds per frame (default: wall-clock time between frames)
    #[arg(long)]
    fixed_dt: Option<f32>,

    /// Directory for frame_NNNNN.png output (default: statistics only)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output image width and height in pixels
    #[arg(long)]
    image_size: Option<u32>,

    /// Isoline stroke width in pixels
    #[arg(long)]
    line_width: Option<f32>,

    /// Grid cells along X
    #[arg(long)]
    grid_width: Option<u32>,

    /// Grid cells along Y
    #[arg(long)]
    grid_height: Option<u32>,

    /// Isoline level
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<f32>,

    /// Value where the blue band saturates
    #[arg(long, allow_negative_numbers = true)]
    min_value: Option<f32>,

    /// Value where the red band saturates
    #[arg(long, allow_negative_numbers = true)]
    max_value: Option<f32>,

    /// Boundary between the blue and red bands
    #[arg(long, allow_negative_numbers = true)]
    change_value: Option<f32>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            field: self.field,
            frames: self.frames,
            fixed_dt: self.fixed_dt,
            image_size: self.image_size,
            line_width: self.line_width,
            output_dir: self.output_dir.clone(),
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            threshold: self.threshold,
            min_value: self.min_value,
            max_value: self.max_value,
            change_value: self.change_value,
        }
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let settings = ViewerSettings::load(args.config.as_deref(), args.overrides())?;

    info!(
        field = %settings.field,
        frames = settings.frames,
        grid_width = settings.parameters.grid_width,
        grid_height = settings.parameters.grid_height,
        threshold = settings.parameters.threshold,
        "Starting isoline viewer"
    );

    let mut driver = FrameDriver::new(settings.parameters.clone(), settings.field)?;
    let mut platform = HeadlessPlatform::new(settings.frames, settings.fixed_dt);

    let mut sink: Box<dyn FrameSink> = match &settings.output_dir {
        Some(dir) => {
            let style = CanvasStyle {
                width: settings.image_size,
                height: settings.image_size,
                line_width: settings.line_width,
                ..Default::default()
            };
            Box::new(PngSequenceSink::create(dir, style)?)
        }
        None => Box::new(StatsSink::default()),
    };

    let stats = driver.run(&mut platform, sink.as_mut())?;

    info!(
        frames = stats.frames,
        polled = platform.frames(),
        final_time = stats.final_time,
        max_contour_vertices = stats.max_contour_vertices,
        total_segments = stats.total_segments,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "Viewer finished"
    );

    Ok(())
}
