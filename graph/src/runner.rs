//! Drives a [`GraphAdapter`] from a quote feed.
//!
//! The feed runs as its own task and pushes pairs into a bounded channel.
//! The adapter is driven from the calling task only, one pair at a time, so
//! updates never overlap and need no locking.

use std::sync::Arc;

use tokio::sync::mpsc::{self, Receiver};
use tracing::{Instrument, info};

use common::logger::{TraceId, root_span};
use market::feed::QuoteFeed;
use market::types::QuotePair;

use crate::adapter::GraphAdapter;
use crate::widget::Visualization;

/// Counters for one drained feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Quote pairs received from the feed.
    pub delivered: usize,
    /// Rows accepted by the widget.
    pub appended: usize,
    /// Appended rows whose ratio was outside the band.
    pub alerts: usize,
}

/// Feed every pair from `rx` to the adapter until the channel closes.
pub async fn run_graph<V: Visualization>(
    adapter: &mut GraphAdapter<V>,
    mut rx: Receiver<QuotePair>,
) -> RunSummary {
    let mut summary = RunSummary::default();

    while let Some(pair) = rx.recv().await {
        summary.delivered += 1;

        if let Some(row) = adapter.on_data(&pair) {
            summary.appended += 1;
            if row.is_alert() {
                summary.alerts += 1;
            }
        }
    }

    summary
}

/// Spawn `feed` and drive `adapter` with everything it delivers.
///
/// Returns once the feed has finished and the channel is drained. A feed that
/// fails (e.g. its source cannot be opened) is reported as an error after the
/// rows it did deliver have been processed.
pub async fn run_feed<F, V>(
    feed: Arc<F>,
    adapter: &mut GraphAdapter<V>,
    capacity: usize,
) -> anyhow::Result<RunSummary>
where
    F: QuoteFeed,
    V: Visualization,
{
    let trace_id = TraceId::new();
    let span = root_span("ratio_graph", &trace_id);
    span.record("feed", feed.name());

    let (tx, rx) = mpsc::channel(capacity.max(1));

    let feed_task = tokio::spawn(
        async move { feed.stream_quotes(tx).await }.instrument(span.clone()),
    );

    let summary = async {
        info!(state = ?adapter.state(), "Consuming quote feed");
        let summary = run_graph(adapter, rx).await;
        info!(
            delivered = summary.delivered,
            appended = summary.appended,
            alerts = summary.alerts,
            "Quote feed drained"
        );
        summary
    }
    .instrument(span)
    .await;

    feed_task.await??;
    Ok(summary)
}
