use clap::Parser;
use matchviz_rs::batch::DEFAULT_WINDOW;
use matchviz_rs::error::ReplayError;
use matchviz_rs::event::EventTime;
use matchviz_rs::replay::{Replay, load_events};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "replay",
    about = "Replay a recorded maximal-matching trace as concurrent frames"
)]
struct Args {
    /// Path to the event log (JSON array produced by the protocol recorder)
    #[arg(default_value = "simulation_events.json")]
    log: PathBuf,

    /// Concurrency window in milliseconds (default 100)
    #[arg(long)]
    window_ms: Option<i64>,

    /// Output scene JSON file (for the display host)
    #[arg(long)]
    scenes_json: Option<PathBuf>,

    /// Stop frame iteration after N frames
    #[arg(long)]
    max_frames: Option<usize>,

    /// Reject events that reference nodes outside the topology
    #[arg(long)]
    strict: bool,

    /// Print one title line per frame to stdout
    #[arg(long)]
    summary: bool,
}

fn run(args: Args) -> Result<(), ReplayError> {
    let events = load_events(&args.log)?;
    let window = args
        .window_ms
        .map(EventTime::from_millis)
        .unwrap_or(DEFAULT_WINDOW);

    let mut replay = if args.strict {
        Replay::from_events_strict(events, window)?
    } else {
        Replay::from_events(events, window)?
    };

    // Stopping early via --max-frames is a normal, non-terminal exit from
    // the frame loop.
    let limit = args.max_frames.unwrap_or(replay.total_frames());
    let mut scenes = Vec::new();
    while replay.frames_applied() < limit {
        let Some(scene) = replay.advance() else {
            break;
        };
        if args.summary {
            println!("{}", scene.title);
        }
        scenes.push(scene);
    }

    if let Some(path) = args.scenes_json {
        let json = serde_json::to_string_pretty(&scenes).expect("serialize scenes");
        fs::write(&path, json).map_err(|source| ReplayError::Io {
            path: path.clone(),
            source,
        })?;
        eprintln!("wrote {} scenes to {}", scenes.len(), path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
