use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halftone::models::{ErasePoint, JobConfig, UploadLimits};
use halftone::services::{debounced, FileWatcher, HalftoneSession, JobChange};
use halftone_engine::{matrix_for, DitherPattern, HalftoneParams, ShapeType};

#[derive(Parser)]
#[command(name = "halftone")]
#[command(about = "Turn PNG images into rotated-grid halftones, dither patterns and ASCII art")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a job (or a bare input image) to a PNG file
    Render {
        /// Job file (YAML); defaults to $HALFTONE_JOB
        job: Option<PathBuf>,

        /// Input PNG, overrides the job's input
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output PNG, overrides the job's output
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        params: ParamArgs,

        /// Erase brush position, repeatable (e.g. --erase 120,80 --erase 130,84,35)
        #[arg(long, value_name = "X,Y[,R]", allow_hyphen_values = true)]
        erase: Vec<ErasePoint>,

        /// Radius for erase points without their own
        #[arg(long)]
        brush_radius: Option<f64>,

        /// Recompress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// Re-render whenever the job file or its input image changes
    Watch {
        /// Job file (YAML); defaults to $HALFTONE_JOB
        job: Option<PathBuf>,

        /// Quiet period before a change is rendered, in milliseconds
        #[arg(long, default_value_t = 150)]
        debounce_ms: u64,
    },
    /// List dither patterns and shapes
    Patterns,
}

/// Per-parameter overrides applied on top of the job file.
#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Grid spacing in pixels
    #[arg(long)]
    cell_size: Option<f64>,

    /// Shape size multiplier
    #[arg(long)]
    shape_size: Option<f64>,

    /// circle, square or ascii
    #[arg(long)]
    shape: Option<ShapeType>,

    /// variable, bayer2, bayer4, bayer8, clustered, horizontal, vertical,
    /// diagonal, checkerboard or circular
    #[arg(long)]
    pattern: Option<DitherPattern>,

    /// Color for dark regions (#RRGGBB)
    #[arg(long)]
    color_a: Option<String>,

    /// Color for light regions (#RRGGBB)
    #[arg(long)]
    color_b: Option<String>,

    /// Background fill (#RRGGBB)
    #[arg(long)]
    background: Option<String>,

    /// Lowest darkness that is drawn (0..1)
    #[arg(long)]
    threshold_min: Option<f64>,

    /// Highest darkness that is drawn (0..1)
    #[arg(long)]
    threshold_max: Option<f64>,

    /// Contrast multiplier
    #[arg(long)]
    contrast: Option<f64>,

    /// Brightness offset, roughly -100..100
    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<f64>,

    /// Gaussian pre-blur radius in pixels
    #[arg(long)]
    blur: Option<f64>,

    /// Brightness levels (2..256, 256 disables)
    #[arg(long)]
    posterize: Option<u32>,

    /// Grid rotation in degrees
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f64>,
}

impl ParamArgs {
    fn apply(self, p: &mut HalftoneParams) {
        if let Some(v) = self.cell_size {
            p.cell_size = v;
        }
        if let Some(v) = self.shape_size {
            p.shape_size = v;
        }
        if let Some(v) = self.shape {
            p.shape = v;
        }
        if let Some(v) = self.pattern {
            p.pattern = v;
        }
        if let Some(v) = self.color_a {
            p.color_a = v;
        }
        if let Some(v) = self.color_b {
            p.color_b = v;
        }
        if let Some(v) = self.background {
            p.background = v;
        }
        if let Some(v) = self.threshold_min {
            p.threshold_min = v;
        }
        if let Some(v) = self.threshold_max {
            p.threshold_max = v;
        }
        if let Some(v) = self.contrast {
            p.contrast = v;
        }
        if let Some(v) = self.brightness {
            p.brightness = v;
        }
        if let Some(v) = self.blur {
            p.blur = v;
        }
        if let Some(v) = self.posterize {
            p.posterize = v;
        }
        if let Some(v) = self.angle {
            p.angle = v;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            job,
            input,
            output,
            params,
            erase,
            brush_radius,
            optimize,
        }) => run_render_command(RenderArgs {
            job,
            input,
            output,
            params,
            erase,
            brush_radius,
            optimize,
        }),
        Some(Commands::Watch { job, debounce_ms }) => {
            run_watch_command(job, Duration::from_millis(debounce_ms)).await
        }
        Some(Commands::Patterns) => {
            run_patterns_command();
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

struct RenderArgs {
    job: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    params: ParamArgs,
    erase: Vec<ErasePoint>,
    brush_radius: Option<f64>,
    optimize: bool,
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Job path from the argument or `HALFTONE_JOB`.
fn job_path(arg: Option<PathBuf>) -> Option<PathBuf> {
    arg.or_else(|| std::env::var("HALFTONE_JOB").ok().map(PathBuf::from))
}

/// `photo.png` -> `photo-halftone.png` next to the input.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}-halftone.png"))
}

/// Render once and write the PNG (no watcher, no runtime work)
fn run_render_command(args: RenderArgs) -> anyhow::Result<()> {
    // Minimal logging for CLI
    init_tracing("halftone=warn");

    let mut job = match job_path(args.job) {
        Some(path) => JobConfig::load(&path)?,
        None => JobConfig::default(),
    };

    if args.input.is_some() {
        job.input = args.input;
    }
    if args.output.is_some() {
        job.output = args.output;
    }
    if let Some(radius) = args.brush_radius {
        job.brush_radius = radius;
    }
    job.optimize |= args.optimize;
    job.erase.extend(args.erase);
    args.params.apply(&mut job.params);
    job.validate()?;

    let input = job.input.clone().ok_or_else(|| {
        anyhow::anyhow!("No input image: pass --input or set `input` in the job")
    })?;
    job.output.get_or_insert_with(|| default_output(&input));

    let mut session = HalftoneSession::open(job, UploadLimits::default())?;
    let stats = session.render();
    let output = session.write_output()?;

    println!(
        "Rendered {} ({} of {} cells drawn)",
        output.display(),
        stats.drawn,
        stats.visited
    );
    Ok(())
}

fn watch_list(job_path: &Path, job: &JobConfig) -> Vec<PathBuf> {
    std::iter::once(job_path.to_path_buf())
        .chain(job.input.clone())
        .collect()
}

/// Re-render on every settled change to the job file or its input
async fn run_watch_command(job: Option<PathBuf>, debounce: Duration) -> anyhow::Result<()> {
    init_tracing("halftone=info");

    let job_path = job_path(job)
        .ok_or_else(|| anyhow::anyhow!("No job file: pass a path or set HALFTONE_JOB"))?;

    let mut job = JobConfig::load(&job_path)?;
    if job.output.is_none() {
        job.output = job.input.as_deref().map(default_output);
    }
    let mut session = HalftoneSession::open(job, UploadLimits::default())?;
    session.render();
    session.write_output()?;

    let (queue, mut pending) = debounced(debounce);
    let mut watcher = FileWatcher::new(watch_list(&job_path, session.job()), queue.clone());
    if !watcher.is_active() {
        anyhow::bail!("File watcher could not be started for {}", job_path.display());
    }
    tracing::info!(
        job = %job_path.display(),
        debounce_ms = debounce.as_millis() as u64,
        "Watching for changes (Ctrl-C to stop)"
    );

    loop {
        tokio::select! {
            request = pending.next() => {
                if request.is_none() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watch mode");
                break;
            }
        }

        let mut next = match JobConfig::load(&job_path) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid job file, keeping previous parameters");
                continue;
            }
        };
        if next.output.is_none() {
            next.output = next.input.as_deref().map(default_output);
        }

        let previous_input = session.job().input.clone();
        match session.apply(next) {
            Ok(JobChange::Unchanged) => {}
            Ok(_) => {
                if session.job().input != previous_input {
                    watcher =
                        FileWatcher::new(watch_list(&job_path, session.job()), queue.clone());
                }
                if let Err(e) = session.write_output() {
                    tracing::warn!(error = %e, "Failed to write output");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to apply job, keeping previous image"),
        }
    }

    drop(watcher);
    Ok(())
}

/// List dither patterns with their matrix sizes
fn run_patterns_command() {
    println!("Patterns:");
    for pattern in DitherPattern::ALL {
        let detail = match matrix_for(pattern) {
            Some(matrix) => format!("{0}x{0} matrix", matrix.size()),
            None => "continuous size, no matrix".to_string(),
        };
        println!("  {:<13} {detail}", pattern.name());
    }

    println!("\nShapes:");
    for shape in ShapeType::ALL {
        println!("  {:<13} scale {}", shape.name(), shape.scale_factor());
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let job = std::env::var("HALFTONE_JOB").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Halftone v{VERSION}");
    println!("Rotated-grid halftone renderer\n");

    println!("Environment Variables:");
    println!(
        "  HALFTONE_JOB = {}",
        job.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG     = {}",
        rust_log.as_deref().unwrap_or("(not set)")
    );

    if let Some(path) = job.as_deref().map(Path::new) {
        println!("\nJob:");
        match JobConfig::load(path) {
            Ok(job) => {
                let input = job
                    .input
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string());
                println!("  Input:   {input}");
                println!(
                    "  Pattern: {} / {}, cell {} px, angle {}°",
                    job.params.pattern, job.params.shape, job.params.cell_size, job.params.angle
                );
                println!("  Erase:   {} points", job.erase.len());
            }
            Err(e) => println!("  Error:   {e}"),
        }
    }

    let limits = UploadLimits::default();
    println!("\nLimits:");
    println!("  File size:  {} MiB", limits.max_file_size / (1024 * 1024));
    println!("  Dimensions: {}x{}", limits.max_width, limits.max_height);

    println!("\nCommands:");
    println!("  halftone render     Render a job or image to PNG");
    println!("  halftone watch      Re-render when the job file changes");
    println!("  halftone patterns   List dither patterns and shapes");
    println!("\nRun 'halftone --help' for more details.");
}
