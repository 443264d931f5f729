use std::fs::File;
use std::io::BufReader;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::{Level, error, info, warn};

use fractal_zoom::{
    AnimationController, DensityStatistics, FileCheckpointStore, FrameFiles, FrameSize,
    RunConfig, RunStart, decode_archive, load_checkpoint, read_frame_table,
};

#[derive(Parser, Debug)]
#[command(name = "fractal_zoom", version)]
struct Cli {
    /// Log per-row progress and density statistics.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every frame of a frame table.
    Render(RenderArgs),
    /// Decode an iteration archive and report its density statistics.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// `;`-delimited frame table.
    #[arg(long)]
    frames: PathBuf,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1088)]
    height: u32,

    /// Render threads; defaults to the number of available cores.
    #[arg(long)]
    workers: Option<NonZeroUsize>,

    /// Significant digits kept distinguishable across the viewport.
    #[arg(long, default_value_t = 6)]
    digits: u32,

    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, default_value = "frame_")]
    image_prefix: String,

    #[arg(long, default_value = "iterations_")]
    iterations_prefix: String,

    /// Skip the PNG of each frame.
    #[arg(long)]
    no_images: bool,

    /// Skip the iteration archive of each frame.
    #[arg(long)]
    no_iterations: bool,

    #[arg(long, default_value = "resume.json")]
    checkpoint: PathBuf,

    /// Continue from the checkpoint when one exists.
    #[arg(long)]
    resume: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[arg(long)]
    archive: PathBuf,

    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let result = match cli.cmd {
        Command::Render(args) => render(args),
        Command::Inspect(args) => inspect(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn render(args: RenderArgs) -> anyhow::Result<()> {
    let frames = read_frame_table(&args.frames)
        .with_context(|| format!("read frame table {}", args.frames.display()))?;
    info!(frames = frames.len(), "frame table loaded");

    let frame_size = FrameSize::new(args.width, args.height).context("frame size")?;
    let mut config = RunConfig::new(frame_size).with_significant_digits(args.digits);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let start = if args.resume && args.checkpoint.exists() {
        let checkpoint = load_checkpoint(&args.checkpoint)
            .with_context(|| format!("load checkpoint {}", args.checkpoint.display()))?;
        info!(next_frame = checkpoint.next_frame + 1, "resuming");
        RunStart::Resume(checkpoint)
    } else {
        if args.resume {
            warn!(path = %args.checkpoint.display(), "no checkpoint found, starting fresh");
        }
        RunStart::Fresh
    };

    let sink = FrameFiles::create(&args.output_dir)
        .context("prepare output directory")?
        .with_image_prefix(args.image_prefix)
        .with_iterations_prefix(args.iterations_prefix)
        .with_images(!args.no_images)
        .with_iterations(!args.no_iterations);
    if matches!(start, RunStart::Fresh) {
        let removed = sink.clear_stale().context("clear previous frames")?;
        if removed > 0 {
            info!(removed, "removed frames from an earlier run");
        }
    }
    let store = FileCheckpointStore::new(&args.checkpoint);

    info!(
        width = frame_size.width(),
        height = frame_size.height(),
        workers = config.workers.get(),
        digits = config.significant_digits,
        "starting run"
    );

    let mut controller = AnimationController::new(config, sink, store).context("start run")?;
    let summary = controller.run(&frames, start).context("render frames")?;

    info!(
        frames_rendered = summary.frames_rendered,
        elapsed_secs = summary.elapsed.as_secs_f64(),
        "run finished"
    );

    Ok(())
}

fn inspect(args: InspectArgs) -> anyhow::Result<()> {
    let size = FrameSize::new(args.width, args.height).context("frame size")?;
    let file = File::open(&args.archive)
        .with_context(|| format!("open {}", args.archive.display()))?;
    let grid = decode_archive(BufReader::new(file), size)
        .with_context(|| format!("decode {}", args.archive.display()))?;

    let statistics = DensityStatistics::from_grid(&grid);
    info!(
        mean = statistics.mean,
        variance = statistics.variance,
        standard_deviation = statistics.standard_deviation,
        "iteration density"
    );

    Ok(())
}
