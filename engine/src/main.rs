//! gesture-engine - replay hand landmark sessions through the classifier.
//!
//! Reads s-expression protocol messages, one per line, from a session file
//! or stdin and writes one response per line to stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use gesture_engine::gesture::config::{
    DEFAULT_CURL_RATIO, DEFAULT_PALM_HISTORY_CAPACITY, DEFAULT_PALM_STABILITY_RADIUS,
    DEFAULT_PINCH_DISTANCE, DEFAULT_SWIPE_VELOCITY, DEFAULT_VELOCITY_WINDOW,
};
use gesture_engine::{ipc, GestureConfig, GestureEngine};

#[derive(Parser, Debug)]
#[command(name = "gesture-engine", version, about = "Hand gesture classifier")]
struct Cli {
    /// Session file of protocol messages (default: stdin)
    input: Option<PathBuf>,

    /// Minimum palm speed (units/s) for a swipe
    #[arg(long, default_value_t = DEFAULT_SWIPE_VELOCITY)]
    swipe_velocity: f32,

    /// Maximum thumb-index tip distance for a pinch
    #[arg(long, default_value_t = DEFAULT_PINCH_DISTANCE)]
    pinch_distance: f32,

    /// Tip/PIP distance ratio above which a finger is extended
    #[arg(long, default_value_t = DEFAULT_CURL_RATIO)]
    curl_ratio: f32,

    /// Maximum palm drift for a held-still open hand
    #[arg(long, default_value_t = DEFAULT_PALM_STABILITY_RADIUS)]
    palm_radius: f32,

    /// Palm-center samples kept for the stability check
    #[arg(long, default_value_t = DEFAULT_PALM_HISTORY_CAPACITY)]
    palm_history: usize,

    /// Velocity samples averaged for smoothing
    #[arg(long, default_value_t = DEFAULT_VELOCITY_WINDOW)]
    velocity_window: usize,

    /// Log every request and response to stderr
    #[arg(long)]
    trace: bool,
}

impl Cli {
    fn config(&self) -> GestureConfig {
        GestureConfig {
            swipe_velocity: self.swipe_velocity,
            pinch_distance: self.pinch_distance,
            curl_ratio: self.curl_ratio,
            palm_stability_radius: self.palm_radius,
            palm_history_capacity: self.palm_history,
            velocity_window: self.velocity_window,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries protocol responses.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_engine=info".into()),
        )
        .init();

    info!("gesture-engine v{} starting", env!("CARGO_PKG_VERSION"));

    let mut engine = GestureEngine::new(cli.config()).context("invalid gesture configuration")?;

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            info!("replaying {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open session file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut handled = 0u64;

    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        if cli.trace {
            info!("<- {}", line);
        }
        if let Some(response) = ipc::handle_message(&mut engine, line) {
            if cli.trace {
                info!("-> {}", response);
            }
            writeln!(out, "{}", response)?;
        }
        handled += 1;
    }

    info!("processed {} messages", handled);
    Ok(())
}
