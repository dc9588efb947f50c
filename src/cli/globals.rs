use crate::{
    client::AuthClient,
    config::AppConfig,
    i18n::Locale,
    store::{FileStore, TokenStore},
};
use anyhow::{Context, Result};

/// Settings shared by every subcommand.
#[derive(Clone, Debug)]
pub struct GlobalArgs {
    pub config: AppConfig,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    /// # Errors
    /// Returns an error if the configured base URL is invalid.
    pub fn client(&self) -> Result<AuthClient> {
        self.config.client()
    }

    /// # Errors
    /// Returns an error if the storage file cannot be read.
    pub fn store(&self) -> Result<TokenStore<FileStore>> {
        self.config.open_store().with_context(|| {
            format!(
                "failed to open storage file {}",
                self.config.state_file.display()
            )
        })
    }
}
