use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use ascii_reel::{AnimationRecord, DirStore, Fps, Player, PlayerOpts, TerminalSink};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ascii-reel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an animation record and print a summary.
    Inspect(InspectArgs),
    /// Remove rows from the top and bottom of every frame.
    Trim(TrimArgs),
    /// Play an animation record in the terminal.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct TrimArgs {
    /// Input record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Rows removed from the top of each frame.
    #[arg(long, default_value_t = 25)]
    top: usize,

    /// Rows removed from the bottom of each frame.
    #[arg(long, default_value_t = 20)]
    bottom: usize,

    /// Output path. Defaults to `<stem>_trimmed.json` next to the input.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Playback rate in frames per second.
    #[arg(long, default_value_t = 15.0)]
    fps: f64,

    /// Stop after this many passes over the record; 0 plays until Ctrl-C.
    #[arg(long, default_value_t = 0)]
    loops: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Trim(args) => cmd_trim(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let record = AnimationRecord::from_path(&args.in_path)
        .with_context(|| format!("read record '{}'", args.in_path.display()))?;

    println!("subject: {}", record.subject_id());
    println!("frames: {}", record.frame_count());
    match record.grid_size() {
        Some((rows, cols)) => println!("grid: {cols}x{rows}"),
        None => println!("grid: empty"),
    }
    println!("rectangular: {}", record.is_rectangular());
    let empty = record.empty_frames();
    if !empty.is_empty() {
        println!("empty frames: {empty:?}");
    }
    match record.generated_at() {
        Some(at) => println!("generated: {}", at.to_rfc3339()),
        None => println!("generated: unknown"),
    }
    Ok(())
}

fn cmd_trim(args: TrimArgs) -> anyhow::Result<()> {
    let record = AnimationRecord::from_path(&args.in_path)
        .with_context(|| format!("read record '{}'", args.in_path.display()))?;
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| trimmed_path(&args.in_path));

    let trimmed = record.trimmed(args.top, args.bottom);
    trimmed
        .save(&out)
        .with_context(|| format!("write record '{}'", out.display()))?;

    eprintln!(
        "trimmed {} frames (top {}, bottom {}), wrote {}",
        trimmed.frame_count(),
        args.top,
        args.bottom,
        out.display()
    );
    Ok(())
}

fn trimmed_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "animation".to_owned());
    input.with_file_name(format!("{stem}_trimmed.json"))
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let record = AnimationRecord::from_path(&args.in_path)
        .with_context(|| format!("read record '{}'", args.in_path.display()))?;
    let store_root = args
        .in_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    rt.block_on(async move {
        let opts = PlayerOpts {
            fps: Fps::new(args.fps)?,
            autoplay: true,
        };
        let frames = record.frame_count();
        let mut player = Player::new(
            TerminalSink::new(std::io::stdout()),
            DirStore::new(store_root),
            opts,
        )?;
        player.load(record);

        if args.loops == 0 {
            tokio::signal::ctrl_c().await.context("wait for ctrl-c")?;
        } else {
            tokio::time::sleep(play_duration(opts.fps, frames, args.loops)?).await;
        }
        player.pause();
        Ok::<_, anyhow::Error>(())
    })?;

    tracing::debug!("playback stopped");
    Ok(())
}

/// Wall time for `loops` passes over `frames` frames, plus half a period so the last frame of the
/// last pass is shown.
fn play_duration(fps: Fps, frames: usize, loops: u32) -> anyhow::Result<Duration> {
    let period = fps.frame_interval();
    let frames = u32::try_from(frames).context("record has too many frames for --loops")?;
    frames
        .checked_mul(loops)
        .and_then(|ticks| period.checked_mul(ticks))
        .and_then(|d| d.checked_add(period / 2))
        .with_context(|| {
            format!("playing {frames} frames {loops} times at {} fps overflows", fps.get())
        })
}
