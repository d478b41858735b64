use dialer_core::stream_url::DEFAULT_VOICE_AGENT_HOST;
use secrecy::SecretString;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Telephony providers a call can be placed through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    Telnyx,
    Twilio,
}

#[derive(Debug)]
pub struct TelnyxConfig {
    pub api_key: SecretString,
    pub connection_id: String,
    pub from_number: String,
}

#[derive(Debug)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: SecretString,
    pub phone_number: String,
}

/// The voice-agent service that receives the call's media stream.
#[derive(Debug)]
pub struct VoiceAgentConfig {
    pub host: String,
    pub api_key: SecretString,
    pub agent_id: String,
}

/// Values given on the command line that take precedence over the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub provider: Option<Provider>,
    pub to_number: Option<String>,
}

/// Holds all configuration loaded from the environment at startup.
///
/// Only the section of the selected provider is loaded.
#[derive(Debug)]
pub struct Config {
    pub provider: Provider,
    pub to_number: String,
    pub agent: VoiceAgentConfig,
    pub telnyx: Option<TelnyxConfig>,
    pub twilio: Option<TwilioConfig>,
    pub log_level: Level,
}

/// Reads a variable, treating an empty value as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingVar(name.to_string()))
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(&Overrides::default())
    }

    /// Loads configuration from environment variables, applying `overrides` first.
    pub fn from_env_with(overrides: &Overrides) -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let provider = match overrides.provider {
            Some(provider) => provider,
            None => {
                let provider_str =
                    optional("TELEPHONY_PROVIDER").unwrap_or_else(|| "telnyx".to_string());
                match provider_str.to_lowercase().as_str() {
                    "telnyx" => Provider::Telnyx,
                    "twilio" => Provider::Twilio,
                    other => {
                        return Err(ConfigError::InvalidValue(
                            "TELEPHONY_PROVIDER".to_string(),
                            format!("'{}' is not one of 'telnyx', 'twilio'", other),
                        ));
                    }
                }
            }
        };

        let to_number = match &overrides.to_number {
            Some(number) => number.clone(),
            None => required("TO_NUMBER")?,
        };

        let agent = VoiceAgentConfig {
            host: optional("VOICE_AGENT_HOST")
                .unwrap_or_else(|| DEFAULT_VOICE_AGENT_HOST.to_string()),
            api_key: SecretString::from(required("VOICE_AGENT_API_KEY")?),
            agent_id: required("VOICE_AGENT_ID")?,
        };

        let log_level_str = optional("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let (telnyx, twilio) = match provider {
            Provider::Telnyx => (
                Some(TelnyxConfig {
                    api_key: SecretString::from(required("TELNYX_API_KEY")?),
                    connection_id: required("TELNYX_CONNECTION_ID")?,
                    from_number: required("TELNYX_FROM_NUMBER")?,
                }),
                None,
            ),
            Provider::Twilio => (
                None,
                Some(TwilioConfig {
                    account_sid: required("TWILIO_ACCOUNT_SID")?,
                    auth_token: SecretString::from(required("TWILIO_AUTH_TOKEN")?),
                    phone_number: required("TWILIO_PHONE_NUMBER")?,
                }),
            ),
        };

        Ok(Self {
            provider,
            to_number,
            agent,
            telnyx,
            twilio,
            log_level,
        })
    }
}
