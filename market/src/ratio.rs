//! Ratio Row
//!
//! Derives one chart row from a pair of top-of-book snapshots.
//!
//! ## Definitions
//! ```text
//! price_a = (ask_a + bid_a) / 2
//! price_b = (ask_b + bid_b) / 2
//! ratio   = price_a / price_b
//! upper   = 1 + tolerance
//! lower   = 1 - tolerance
//! alert   = ratio   if ratio > upper || ratio < lower
//! ```
//!
//! ## Degenerate input
//! The division is not guarded. With `price_b == 0` the ratio follows IEEE-754:
//! - `price_a > 0` gives `+inf`, which is above the band and raises an alert;
//! - `price_a == 0` gives `NaN`, which compares false both ways and never alerts.
//!
//! JSON has no number for these values, so rows serialize them as the strings
//! `"Infinity"`, `"-Infinity"` and `"NaN"`. A missing alert is always `null`.
//!
//! ## Determinism
//! The derivation is pure: no state is carried between calls and identical
//! inputs always produce identical rows.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::types::QuotePair;

/// Tolerance applied around a ratio of 1.0 when none is configured.
pub const DEFAULT_TOLERANCE: f64 = 0.10;

/// Symmetric band around 1.0 outside of which the ratio raises an alert.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatioBand {
    pub tolerance: f64,
}

impl Default for RatioBand {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl RatioBand {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn upper(&self) -> f64 {
        1.0 + self.tolerance
    }

    pub fn lower(&self) -> f64 {
        1.0 - self.tolerance
    }

    /// Strictly outside the band. Values equal to a bound do not breach.
    pub fn is_breach(&self, ratio: f64) -> bool {
        ratio > self.upper() || ratio < self.lower()
    }
}

/// A single row for the chart's backing table.
///
/// Field names match the declared table schema one to one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RatioRow {
    #[serde(serialize_with = "float_repr")]
    pub price_a: f64,
    #[serde(serialize_with = "float_repr")]
    pub price_b: f64,
    #[serde(serialize_with = "float_repr")]
    pub ratio: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(serialize_with = "float_repr")]
    pub upper_bound: f64,
    #[serde(serialize_with = "float_repr")]
    pub lower_bound: f64,
    /// Equals `ratio` while it is outside the band, `None` otherwise.
    #[serde(serialize_with = "optional_float_repr")]
    pub trigger_alert: Option<f64>,
}

fn float_repr<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}

fn optional_float_repr<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => float_repr(v, serializer),
        None => serializer.serialize_none(),
    }
}

impl RatioRow {
    pub fn is_alert(&self) -> bool {
        self.trigger_alert.is_some()
    }
}

/// Derive the chart row for one quote pair.
///
/// # Inputs
/// - `pair`: instrument A and instrument B, in that order
/// - `band`: tolerance band used for the alert
///
/// # Output
/// The row timestamp is the later of the two snapshot timestamps; on a tie the
/// timestamp of instrument B is used (both are equal anyway).
pub fn derive_row(pair: &QuotePair, band: RatioBand) -> RatioRow {
    let price_a = pair.a.mid_price();
    let price_b = pair.b.mid_price();
    let ratio = price_a / price_b;

    let timestamp = if pair.a.timestamp > pair.b.timestamp {
        pair.a.timestamp
    } else {
        pair.b.timestamp
    };

    RatioRow {
        price_a,
        price_b,
        ratio,
        timestamp,
        upper_bound: band.upper(),
        lower_bound: band.lower(),
        trigger_alert: band.is_breach(ratio).then_some(ratio),
    }
}
