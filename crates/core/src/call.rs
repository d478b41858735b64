//! Provider-independent description of one outbound call.

use crate::{
    error::CallError,
    stream_url::{StreamScheme, StreamUrl},
    transport::OutboundRequest,
};
use std::fmt;

/// Everything needed to place one call, assembled right before submission.
#[derive(Debug, Clone)]
pub struct CallRequest {
    /// Number the call is placed from.
    pub from: String,
    /// Number being dialled.
    pub to: String,
    /// Telnyx connection id or Twilio account SID.
    pub account: String,
    /// Where the provider streams the call's media.
    pub stream_url: StreamUrl,
}

/// What a provider reported after accepting a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The call-control endpoint accepted the request.
    Submitted { status: u16, body: String },
    /// A call resource was created.
    Created {
        call_sid: String,
        status: Option<String>,
    },
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallOutcome::Submitted { status, body } => write!(f, "Status: {}\n{}", status, body),
            CallOutcome::Created { call_sid, .. } => write!(f, "Call started: {}", call_sid),
        }
    }
}

pub type CallResult = Result<CallOutcome, CallError>;

/// A telephony provider that can place a streaming call.
pub trait CallPlacer {
    /// Short provider name used in logs.
    fn provider(&self) -> &'static str;

    /// Scheme this provider expects on the streaming callback URL.
    fn stream_scheme(&self) -> StreamScheme;

    /// Assembles the provider request without sending it.
    fn prepare(&self, request: &CallRequest) -> Result<OutboundRequest, CallError>;

    /// Sends exactly one request and classifies the result.
    fn place_call(&self, request: &CallRequest) -> CallResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_report() {
        let outcome = CallOutcome::Submitted {
            status: 201,
            body: r#"{"data":{"id":"abc"}}"#.to_string(),
        };
        assert_eq!(outcome.to_string(), "Status: 201\n{\"data\":{\"id\":\"abc\"}}");
    }

    #[test]
    fn test_created_report() {
        let outcome = CallOutcome::Created {
            call_sid: "CA42".to_string(),
            status: Some("queued".to_string()),
        };
        assert_eq!(outcome.to_string(), "Call started: CA42");
    }
}
