use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error("widget used before initialization")]
    NotInitialized,

    #[error("unknown field `{0}` in display configuration")]
    UnknownField(String),

    #[error("widget I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("row serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
