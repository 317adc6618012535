//! Replays recorded quote pairs from a JSON-lines file.
//!
//! Each non-blank line holds one delivery from the streamer: a JSON array with
//! the instrument A snapshot followed by the instrument B snapshot. Lines that
//! fail to decode, or that do not hold exactly two snapshots, are logged and
//! skipped so that one bad record does not end the replay.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use tracing::{Instrument, debug, info, warn};

use super::QuoteFeed;
use crate::error::QuoteError;
use crate::types::{QuotePair, QuoteSnapshot};

pub struct ReplayFeed {
    path: PathBuf,
    /// Pause between deliveries. `None` replays as fast as the consumer allows.
    interval: Option<Duration>,
}

impl ReplayFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            interval: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = (!interval.is_zero()).then_some(interval);
        self
    }

    /// Decode a single line. `line` is 1-based and only used for error context.
    pub fn parse_line(line: usize, raw: &str) -> Result<QuotePair, QuoteError> {
        let snapshots: Vec<QuoteSnapshot> =
            serde_json::from_str(raw).map_err(|source| QuoteError::Decode { line, source })?;

        QuotePair::try_from(snapshots)
    }
}

#[async_trait]
impl QuoteFeed for ReplayFeed {
    fn name(&self) -> &str {
        "replay"
    }

    async fn stream_quotes(&self, sender: Sender<QuotePair>) -> anyhow::Result<()> {
        let span = common::logger::child_span("replay_feed");

        async move {
            let file = File::open(&self.path)
                .await
                .with_context(|| format!("opening quote replay {}", self.path.display()))?;
            let mut lines = BufReader::new(file).lines();

            let mut line_no = 0usize;
            let mut delivered = 0usize;
            let mut skipped = 0usize;

            while let Some(raw) = lines.next_line().await? {
                line_no += 1;
                if raw.trim().is_empty() {
                    continue;
                }

                let pair = match Self::parse_line(line_no, &raw) {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!(error = %e, line = line_no, "Skipping unreadable quote pair");
                        skipped += 1;
                        continue;
                    }
                };

                if delivered > 0 {
                    if let Some(interval) = self.interval {
                        tokio::time::sleep(interval).await;
                    }
                }

                if sender.send(pair).await.is_err() {
                    debug!(line = line_no, "Quote receiver dropped; stopping replay");
                    break;
                }
                delivered += 1;
            }

            info!(delivered, skipped, path = %self.path.display(), "Quote replay finished");
            Ok::<(), anyhow::Error>(())
        }
        .instrument(span)
        .await
    }
}
