//! Quote data model and the ratio derivation for a fixed instrument pair.
//!
//! - [`types`]: quote snapshots as delivered by the upstream streamer
//! - [`ratio`]: pure derivation of one chart row from a quote pair
//! - [`feed`]: sources that deliver quote pairs over a channel
//! - [`error`]: wire-boundary errors

pub mod error;
pub mod feed;
pub mod ratio;
pub mod types;
