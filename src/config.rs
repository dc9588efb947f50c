//! Client configuration: backend origin, identity widget client id, storage file and
//! display locale. Defaults are compiled in; command-line or environment values
//! override them. Configuration values are public; do not store secrets here.

use crate::{
    client::AuthClient,
    federated::DEFAULT_CLIENT_ID,
    i18n::Locale,
    store::{FileStore, StoreError, TokenStore},
};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_STATE_FILE: &str = ".getly/storage.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub google_client_id: String,
    pub state_file: PathBuf,
    pub locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            google_client_id: DEFAULT_CLIENT_ID.to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            locale: Locale::default(),
        }
    }
}

/// Values supplied at run time. `None` keeps the default.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub google_client_id: Option<String>,
    pub state_file: Option<String>,
    pub locale: Option<Locale>,
}

impl Overrides {
    /// Builds overrides from raw strings, dropping blank values. A blank client id is
    /// kept: it turns the identity widget off.
    #[must_use]
    pub fn from_raw(
        api_base_url: Option<&str>,
        google_client_id: Option<&str>,
        state_file: Option<&str>,
        locale: Option<Locale>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.and_then(normalize_value),
            google_client_id: google_client_id.map(|value| value.trim().to_string()),
            state_file: state_file.and_then(normalize_value),
            locale,
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn load(overrides: Overrides) -> Self {
        let mut config = Self::default();
        apply_overrides(&mut config, overrides);
        config
    }

    /// # Errors
    /// Returns an error if the base URL is not a valid http(s) URL.
    pub fn client(&self) -> anyhow::Result<AuthClient> {
        AuthClient::new(&self.api_base_url)
    }

    /// # Errors
    /// Returns an error if the storage file exists but cannot be read or parsed.
    pub fn open_store(&self) -> Result<TokenStore<FileStore>, StoreError> {
        Ok(TokenStore::new(FileStore::open(&self.state_file)?))
    }
}

fn apply_overrides(config: &mut AppConfig, overrides: Overrides) {
    if let Some(value) = overrides.api_base_url {
        config.api_base_url = value.trim_end_matches('/').to_string();
    }
    if let Some(value) = overrides.google_client_id {
        config.google_client_id = value;
    }
    if let Some(value) = overrides.state_file {
        config.state_file = PathBuf::from(value);
    }
    if let Some(value) = overrides.locale {
        config.locale = value;
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
