//! Error types.

use thiserror::Error;

/// Invalid classification history configuration.
///
/// Normal cache outcomes (eviction, staleness, identifier reuse) are never
/// errors; only structural misuse is reported here.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history capacity must be at least 1")]
    ZeroCapacity,

    #[error("minimum IoU for identity continuity must lie in [0, 1], got {0}")]
    InvalidIou(f32),

    #[error("pending wait timeout must be non-zero")]
    ZeroWaitTimeout,

    #[error("failed to parse history configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure while driving a frame through a classification pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline is not started")]
    NotStarted,

    #[error(transparent)]
    History(#[from] HistoryError),
}
