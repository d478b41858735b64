//! Turns a loaded [`Config`] into a provider client and the call it should place.

use crate::config::{Config, ConfigError, Provider};
use dialer_core::{CallPlacer, CallRequest, StreamUrl, telnyx::TelnyxClient, twilio::TwilioClient};
use secrecy::{ExposeSecret, SecretString};

/// A placer for the configured provider.
pub fn build_placer(config: &Config) -> Result<Box<dyn CallPlacer>, ConfigError> {
    match config.provider {
        Provider::Telnyx => {
            let telnyx = config
                .telnyx
                .as_ref()
                .ok_or_else(|| ConfigError::MissingVar("TELNYX_API_KEY".to_string()))?;
            Ok(Box::new(TelnyxClient::new(copy_secret(&telnyx.api_key))))
        }
        Provider::Twilio => {
            let twilio = config
                .twilio
                .as_ref()
                .ok_or_else(|| ConfigError::MissingVar("TWILIO_AUTH_TOKEN".to_string()))?;
            Ok(Box::new(TwilioClient::new(copy_secret(&twilio.auth_token))))
        }
    }
}

/// The call described by `config`, with a stream URL in the scheme `placer` expects.
pub fn call_request(config: &Config, placer: &dyn CallPlacer) -> Result<CallRequest, ConfigError> {
    let stream_url = StreamUrl::build(
        placer.stream_scheme(),
        &config.agent.host,
        config.agent.api_key.expose_secret(),
        &config.agent.agent_id,
    );

    let (from, account) = match config.provider {
        Provider::Telnyx => {
            let telnyx = config
                .telnyx
                .as_ref()
                .ok_or_else(|| ConfigError::MissingVar("TELNYX_CONNECTION_ID".to_string()))?;
            (telnyx.from_number.clone(), telnyx.connection_id.clone())
        }
        Provider::Twilio => {
            let twilio = config
                .twilio
                .as_ref()
                .ok_or_else(|| ConfigError::MissingVar("TWILIO_ACCOUNT_SID".to_string()))?;
            (twilio.phone_number.clone(), twilio.account_sid.clone())
        }
    };

    Ok(CallRequest {
        from,
        to: config.to_number.clone(),
        account,
        stream_url,
    })
}

fn copy_secret(secret: &SecretString) -> SecretString {
    SecretString::from(secret.expose_secret().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TelnyxConfig, TwilioConfig, VoiceAgentConfig};
    use dialer_core::{StreamScheme, transport::RequestBody};
    use tracing::Level;

    fn agent() -> VoiceAgentConfig {
        VoiceAgentConfig {
            host: "call.aivoco.on.cloud.vispark.in".to_string(),
            api_key: SecretString::from("Umhzz8Kers0itZiYcO5".to_string()),
            agent_id: "be91ce6f-4".to_string(),
        }
    }

    fn telnyx_config() -> Config {
        Config {
            provider: Provider::Telnyx,
            to_number: "+917815843509".to_string(),
            agent: agent(),
            telnyx: Some(TelnyxConfig {
                api_key: SecretString::from("KEY0199".to_string()),
                connection_id: "275604".to_string(),
                from_number: "+14157075426".to_string(),
            }),
            twilio: None,
            log_level: Level::INFO,
        }
    }

    fn twilio_config() -> Config {
        Config {
            provider: Provider::Twilio,
            to_number: "+9178143509".to_string(),
            agent: agent(),
            telnyx: None,
            twilio: Some(TwilioConfig {
                account_sid: "AC0123".to_string(),
                auth_token: SecretString::from("token".to_string()),
                phone_number: "121336763".to_string(),
            }),
            log_level: Level::INFO,
        }
    }

    #[test]
    fn test_telnyx_request_uses_https_callback() {
        let config = telnyx_config();
        let placer = build_placer(&config).expect("placer");
        let request = call_request(&config, placer.as_ref()).expect("request");

        assert_eq!(placer.provider(), "telnyx");
        assert_eq!(request.stream_url.scheme(), StreamScheme::Https);
        assert_eq!(
            request.stream_url.as_str(),
            "https://call.aivoco.on.cloud.vispark.in/ws/Umhzz8Kers0itZiYcO5/be91ce6f-4"
        );
        assert_eq!(request.account, "275604");
        assert_eq!(request.from, "+14157075426");
        assert_eq!(request.to, "+917815843509");

        let outbound = placer.prepare(&request).expect("prepare");
        assert_eq!(outbound.url, dialer_core::telnyx::TELNYX_API_URL);
        assert_eq!(outbound.authorization_header(), "Bearer KEY0199");
    }

    #[test]
    fn test_twilio_request_uses_wss_callback() {
        let config = twilio_config();
        let placer = build_placer(&config).expect("placer");
        let request = call_request(&config, placer.as_ref()).expect("request");

        assert_eq!(placer.provider(), "twilio");
        let expected = "wss://call.aivoco.on.cloud.vispark.in/ws/Umhzz8Kers0itZiYcO5/be91ce6f-4";
        assert_eq!(request.stream_url.as_str(), expected);
        assert_eq!(request.account, "AC0123");
        assert_eq!(request.from, "121336763");

        let outbound = placer.prepare(&request).expect("prepare");
        match outbound.body {
            RequestBody::Form(fields) => {
                let twiml = fields
                    .iter()
                    .find(|(k, _)| k == "Twiml")
                    .map(|(_, v)| v.clone())
                    .expect("Twiml field");
                assert!(twiml.contains(&format!(r#"<Stream url="{}">"#, expected)));
            }
            other => panic!("Expected form body, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_provider_section() {
        let mut config = twilio_config();
        config.twilio = None;
        assert!(matches!(
            build_placer(&config),
            Err(ConfigError::MissingVar(_))
        ));
    }
}
