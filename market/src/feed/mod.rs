pub mod replay;

pub use replay::ReplayFeed;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::types::QuotePair;

/// A source of quote pairs.
///
/// Implementations push pairs into `sender` in delivery order and return once
/// the source is exhausted or the receiving side has gone away.
#[async_trait]
pub trait QuoteFeed: Send + Sync + 'static {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn stream_quotes(&self, sender: Sender<QuotePair>) -> anyhow::Result<()>;
}
