//! Twilio Programmable Voice client.
//!
//! Calls are created against the REST `Calls` resource with inline TwiML, so
//! no TwiML webhook needs to be hosted: the document itself tells Twilio to
//! bridge the media to the voice-agent websocket and hold the line.

use crate::{
    call::{CallOutcome, CallPlacer, CallRequest, CallResult},
    error::CallError,
    stream_url::StreamScheme,
    transport::{Auth, HttpTransport, OutboundRequest, RequestBody, ReqwestTransport},
    twiml::StreamTwiml,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{error, info, warn};

pub const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// The fields of a created call resource this client cares about.
#[derive(Debug, Deserialize)]
pub struct TwilioCallResource {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}

pub struct TwilioClient<T = ReqwestTransport> {
    auth_token: SecretString,
    api_base: String,
    transport: T,
}

impl TwilioClient<ReqwestTransport> {
    pub fn new(auth_token: SecretString) -> Self {
        Self::with_transport(auth_token, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> TwilioClient<T> {
    pub fn with_transport(auth_token: SecretString, transport: T) -> Self {
        Self {
            auth_token,
            api_base: TWILIO_API_BASE.to_string(),
            transport,
        }
    }

    /// Calls resource for the given account.
    fn calls_url(&self, account_sid: &str) -> String {
        format!("{}/Accounts/{}/Calls.json", self.api_base, account_sid)
    }
}

impl<T: HttpTransport> CallPlacer for TwilioClient<T> {
    fn provider(&self) -> &'static str {
        "twilio"
    }

    fn stream_scheme(&self) -> StreamScheme {
        StreamScheme::Wss
    }

    fn prepare(&self, request: &CallRequest) -> Result<OutboundRequest, CallError> {
        let twiml = StreamTwiml::new(request.stream_url.as_str()).to_string();

        Ok(OutboundRequest {
            url: self.calls_url(&request.account),
            auth: Auth::Basic {
                username: request.account.clone(),
                password: SecretString::from(self.auth_token.expose_secret().to_string()),
            },
            body: RequestBody::Form(vec![
                ("To".to_string(), request.to.clone()),
                ("From".to_string(), request.from.clone()),
                ("Twiml".to_string(), twiml),
            ]),
        })
    }

    fn place_call(&self, request: &CallRequest) -> CallResult {
        let outbound = self.prepare(request)?;
        info!(provider = self.provider(), to = %request.to, "Creating call");

        let response = self.transport.post(&outbound).inspect_err(|e| {
            error!(provider = self.provider(), error = %e, "Call request failed");
        })?;

        if !response.is_success() {
            warn!(status = response.status, "Call rejected by provider");
            return Err(CallError::Http {
                status: response.status,
                body: response.body,
            });
        }

        let resource: TwilioCallResource = serde_json::from_str(&response.body)
            .map_err(|e| CallError::InvalidResponse(format!("missing call sid: {}", e)))?;
        info!(call_sid = %resource.sid, status = ?resource.status, "Call created");

        Ok(CallOutcome::Created {
            call_sid: resource.sid,
            status: resource.status,
        })
    }
}
