//! Telnyx Call Control client.
//!
//! A call is created with a single authenticated JSON POST. Telnyx then
//! connects to `webhook_url` for the media stream.

use crate::{
    call::{CallOutcome, CallPlacer, CallRequest, CallResult},
    error::CallError,
    stream_url::StreamScheme,
    transport::{Auth, HttpTransport, OutboundRequest, RequestBody, ReqwestTransport},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{error, info, warn};

/// Fixed call-control endpoint.
pub const TELNYX_API_URL: &str = "https://api.telnyx.com/v2/calls";

/// Body of the call-creation request. These four keys and nothing else.
#[derive(Debug, Serialize)]
pub struct TelnyxCallPayload<'a> {
    pub connection_id: &'a str,
    pub to: &'a str,
    pub from: &'a str,
    pub webhook_url: &'a str,
}

pub struct TelnyxClient<T = ReqwestTransport> {
    api_key: SecretString,
    endpoint: String,
    transport: T,
}

impl TelnyxClient<ReqwestTransport> {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_transport(api_key, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> TelnyxClient<T> {
    pub fn with_transport(api_key: SecretString, transport: T) -> Self {
        Self {
            api_key,
            endpoint: TELNYX_API_URL.to_string(),
            transport,
        }
    }
}

impl<T: HttpTransport> CallPlacer for TelnyxClient<T> {
    fn provider(&self) -> &'static str {
        "telnyx"
    }

    fn stream_scheme(&self) -> StreamScheme {
        StreamScheme::Https
    }

    fn prepare(&self, request: &CallRequest) -> Result<OutboundRequest, CallError> {
        let payload = TelnyxCallPayload {
            connection_id: &request.account,
            to: &request.to,
            from: &request.from,
            webhook_url: request.stream_url.as_str(),
        };

        Ok(OutboundRequest {
            url: self.endpoint.clone(),
            auth: Auth::Bearer(SecretString::from(
                self.api_key.expose_secret().to_string(),
            )),
            body: RequestBody::Json(serde_json::to_value(&payload)?),
        })
    }

    fn place_call(&self, request: &CallRequest) -> CallResult {
        let outbound = self.prepare(request)?;
        info!(provider = self.provider(), to = %request.to, "Submitting call");

        let response = self.transport.post(&outbound).inspect_err(|e| {
            error!(provider = self.provider(), error = %e, "Call request failed");
        })?;

        if response.is_success() {
            info!(status = response.status, "Call accepted");
            Ok(CallOutcome::Submitted {
                status: response.status,
                body: response.body,
            })
        } else {
            warn!(status = response.status, "Call rejected by provider");
            Err(CallError::Http {
                status: response.status,
                body: response.body,
            })
        }
    }
}
