use std::path::PathBuf;

use clap::Parser;

/// Replay recorded quote pairs and stream the ratio chart table as JSON lines.
#[derive(Debug, Parser)]
#[command(name = "ratio-graph", version)]
pub struct Cli {
    /// JSON-lines file of quote pairs (one `[A, B]` array per line)
    #[arg(long, short)]
    pub input: PathBuf,

    /// Where to write the table; stdout when omitted
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Alert band half-width around a ratio of 1.0 (overrides RATIO_TOLERANCE)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Pause between replayed pairs in milliseconds (overrides RATIO_FEED_INTERVAL_MS)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Run without a chart; pairs are consumed but nothing is drawn
    #[arg(long)]
    pub headless: bool,
}
