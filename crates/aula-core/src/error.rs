use thiserror::Error;

/// Failure taxonomy for server interactions.
///
/// `Transport` means the request never produced a usable response;
/// the other variants are server-reported failures. The server signals
/// application errors inconsistently: some endpoints return a non-2xx
/// status, others return 200 with an `{"error": ...}` body. Both map to
/// `Application` when a message is available, `Status` otherwise.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Application(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
