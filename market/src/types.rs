use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// One side of the top of book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: f64,

    /// Resting size at `price`. Carried through, not used by the ratio.
    #[serde(default)]
    pub size: f64,
}

impl BookLevel {
    pub fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }
}

/// Top-of-book snapshot for a single instrument, as sent by the streamer.
///
/// ```json
/// { "stock": "ABC",
///   "top_ask": { "price": 101.0, "size": 10 },
///   "top_bid": { "price": 99.0, "size": 20 },
///   "timestamp": "2019-02-01T09:30:00Z" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    #[serde(default)]
    pub stock: String,
    pub top_ask: BookLevel,
    pub top_bid: BookLevel,
    pub timestamp: DateTime<Utc>,
}

impl QuoteSnapshot {
    pub fn new(stock: impl Into<String>, ask: f64, bid: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            stock: stock.into(),
            top_ask: BookLevel::new(ask, 0.0),
            top_bid: BookLevel::new(bid, 0.0),
            timestamp,
        }
    }

    /// Mean of the top ask and top bid.
    pub fn mid_price(&self) -> f64 {
        (self.top_ask.price + self.top_bid.price) / 2.0
    }
}

/// The two snapshots delivered together: instrument A first, instrument B second.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotePair {
    pub a: QuoteSnapshot,
    pub b: QuoteSnapshot,
}

impl QuotePair {
    pub fn new(a: QuoteSnapshot, b: QuoteSnapshot) -> Self {
        Self { a, b }
    }
}

/// The streamer sends pairs as a JSON array; position decides the instrument.
impl TryFrom<Vec<QuoteSnapshot>> for QuotePair {
    type Error = QuoteError;

    fn try_from(snapshots: Vec<QuoteSnapshot>) -> Result<Self, Self::Error> {
        let n = snapshots.len();
        let [a, b]: [QuoteSnapshot; 2] = snapshots
            .try_into()
            .map_err(|_| QuoteError::PairSize(n))?;

        Ok(Self { a, b })
    }
}
