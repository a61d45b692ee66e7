//! Error types at the engine boundary.

use thiserror::Error;

/// Why a sink refused a violation.
#[derive(Debug, Clone, Error)]
pub enum SinkRejection {
    #[error("control channel is not connected")]
    Disconnected,
    #[error("controller rejected the event: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum AutorefError {
    #[error("telemetry frame could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("violation could not be delivered: {0}")]
    Sink(#[from] SinkRejection),
}
