//! Failure classification shared by every call placer.

/// Why a call could not be placed.
///
/// The `Display` output of each variant is the line reported to the operator.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The provider answered with a non-2xx status.
    #[error("HTTPError {status}: {body}")]
    Http { status: u16, body: String },
    /// The request never produced a response (DNS, refused connection, TLS).
    #[error("URLError: {0}")]
    Transport(String),
    /// The provider accepted the request but its answer could not be read.
    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
    /// The outbound request could not be assembled.
    #[error("Failed to build request: {0}")]
    Request(String),
}

impl CallError {
    /// Builds a `Transport` error from an error and its whole source chain.
    pub fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut reason = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !reason.contains(&cause_text) {
                reason.push_str(": ");
                reason.push_str(&cause_text);
            }
            source = cause.source();
        }
        CallError::Transport(reason)
    }
}

impl From<serde_json::Error> for CallError {
    fn from(err: serde_json::Error) -> Self {
        CallError::Request(err.to_string())
    }
}
