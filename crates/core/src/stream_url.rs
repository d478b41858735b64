//! Construction of the websocket callback URL handed to the telephony provider.
//!
//! The voice-agent service identifies a session by two path segments, an API
//! key and an agent id. Both are inserted verbatim: no validation and no
//! percent-encoding.

use std::fmt;

/// Host of the voice-agent service that receives the bridged media stream.
pub const DEFAULT_VOICE_AGENT_HOST: &str = "call.aivoco.on.cloud.vispark.in";

/// URL scheme a provider expects for its streaming callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamScheme {
    Https,
    Wss,
}

impl StreamScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamScheme::Https => "https",
            StreamScheme::Wss => "wss",
        }
    }
}

/// `<scheme>://<host>/ws/<api_key>/<agent_id>`, treated as an opaque string.
#[derive(Clone, PartialEq, Eq)]
pub struct StreamUrl {
    url: String,
    scheme: StreamScheme,
    host: String,
}

impl StreamUrl {
    pub fn build(scheme: StreamScheme, host: &str, api_key: &str, agent_id: &str) -> Self {
        Self {
            url: format!("{}://{}/ws/{}/{}", scheme.as_str(), host, api_key, agent_id),
            scheme,
            host: host.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn scheme(&self) -> StreamScheme {
        self.scheme
    }
}

impl fmt::Display for StreamUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

// The path carries credentials, so only the scheme and host are shown.
impl fmt::Debug for StreamUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamUrl({}://{}/ws/[REDACTED])", self.scheme.as_str(), self.host)
    }
}
