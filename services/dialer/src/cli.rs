//! Command-line surface of the `dialer` binary.

use crate::config::{Overrides, Provider};
use clap::Parser;

/// Place one outbound call whose audio is streamed to the voice agent.
#[derive(Debug, Parser)]
#[command(name = "dialer", version, about)]
pub struct Cli {
    /// Provider to dial through. Defaults to TELEPHONY_PROVIDER, then telnyx.
    #[arg(value_enum)]
    pub provider: Option<Provider>,

    /// Number to call. Defaults to TO_NUMBER.
    #[arg(long)]
    pub to: Option<String>,

    /// Print the request that would be sent and exit without sending it.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            provider: self.provider,
            to_number: self.to.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_provider_and_flags() {
        let cli = Cli::try_parse_from(["dialer", "twilio", "--to", "+15550001111", "--dry-run"])
            .expect("arguments should parse");

        assert_eq!(cli.provider, Some(Provider::Twilio));
        assert!(cli.dry_run);

        let overrides = cli.overrides();
        assert_eq!(overrides.provider, Some(Provider::Twilio));
        assert_eq!(overrides.to_number.as_deref(), Some("+15550001111"));
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["dialer"]).expect("arguments should parse");
        assert_eq!(cli.provider, None);
        assert_eq!(cli.to, None);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from(["dialer", "vonage"]).is_err());
    }
}
