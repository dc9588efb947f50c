use crate::{
    config::{DEFAULT_API_BASE_URL, DEFAULT_STATE_FILE, Overrides},
    federated::DEFAULT_CLIENT_ID,
    i18n::Locale,
};
use clap::{Arg, ArgMatches, Command, builder::ValueParser};

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_GOOGLE_CLIENT_ID: &str = "google-client-id";
pub const ARG_STATE_FILE: &str = "state-file";
pub const ARG_LOCALE: &str = "locale";

#[must_use]
pub fn validator_locale() -> ValueParser {
    ValueParser::from(|value: &str| value.parse::<Locale>())
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long(ARG_API_BASE_URL)
                .help("Backend origin serving the /auth routes")
                .env("GETLY_API_BASE_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_GOOGLE_CLIENT_ID)
                .long(ARG_GOOGLE_CLIENT_ID)
                .help("Client id of the Google identity widget")
                .env("GETLY_GOOGLE_CLIENT_ID")
                .default_value(DEFAULT_CLIENT_ID)
                .global(true),
        )
        .arg(
            Arg::new(ARG_STATE_FILE)
                .long(ARG_STATE_FILE)
                .help("JSON file holding the stored tokens")
                .env("GETLY_STATE_FILE")
                .default_value(DEFAULT_STATE_FILE)
                .global(true),
        )
        .arg(
            Arg::new(ARG_LOCALE)
                .long(ARG_LOCALE)
                .help("Message language: he or en")
                .env("GETLY_LOCALE")
                .default_value("he")
                .global(true)
                .value_parser(validator_locale()),
        )
}

/// Reads the backend options into config overrides.
#[must_use]
pub fn overrides(matches: &ArgMatches) -> Overrides {
    Overrides::from_raw(
        matches.get_one::<String>(ARG_API_BASE_URL).map(String::as_str),
        matches
            .get_one::<String>(ARG_GOOGLE_CLIENT_ID)
            .map(String::as_str),
        matches.get_one::<String>(ARG_STATE_FILE).map(String::as_str),
        matches.get_one::<Locale>(ARG_LOCALE).copied(),
    )
}
