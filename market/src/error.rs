use thiserror::Error;

/// Errors raised while turning wire data into quote pairs.
///
/// The derivation itself has no error path; these only exist at the boundary
/// where untrusted input is decoded.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("expected exactly 2 quote snapshots, got {0}")]
    PairSize(usize),

    #[error("line {line}: malformed quote pair: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
