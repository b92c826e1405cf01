//! uWave client error types.

/// Errors from the uWave HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum UwaveError {
    /// Request never produced a response (connect, DNS, timeout).
    #[error("upstream unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status (strict decoding only).
    #[error("upstream error {status}: {message}")]
    Api { status: u16, message: String },

    /// Body was not a valid document (strict decoding only).
    #[error("JSON parse error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// The mock upstream has no document for this resource.
    #[error("no mock document for {resource}")]
    MockMissing { resource: String },

    /// Mock fixture files could not be loaded.
    #[error("mock data error: {message}")]
    MockData { message: String },
}

impl UwaveError {
    /// Whether the upstream could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, UwaveError::Transport(_))
    }
}
