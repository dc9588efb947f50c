//! Identity widget integration. The widget hands over an opaque credential through a
//! callback; here that callback is the [`CredentialHandler`] capability, implemented
//! once for the sign-up page and once for the sign-in page.

use crate::{
    client::AuthClient,
    flows::{GoogleSignUpFlow, Outcome, SignInFlow},
    i18n::{Locale, Message},
    store::{KeyValueStore, StoreError, TokenStore},
    ui::Label,
};
use secrecy::SecretString;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Identity widget client id used when none is configured.
pub const DEFAULT_CLIENT_ID: &str =
    "846963901431-hhi0lbod25gqqkm15tdosjgdj0uv5fjf.apps.googleusercontent.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("identity services are unavailable: no client id configured")]
    Unavailable,
}

impl WidgetError {
    /// Message shown in place of the button.
    #[must_use]
    pub fn message(&self, locale: Locale) -> &'static str {
        match self {
            Self::Unavailable => Message::IdentityServicesUnavailable.text(locale),
        }
    }
}

/// Opaque credential produced by the widget; forwarded verbatim as `id_token`.
pub struct IdentityCredential(SecretString);

impl IdentityCredential {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(SecretString::from(raw.into()))
    }

    #[must_use]
    pub fn id_token(&self) -> &SecretString {
        &self.0
    }
}

impl fmt::Debug for IdentityCredential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("IdentityCredential(******)")
    }
}

/// Receives the widget's credential callback.
#[allow(async_fn_in_trait)]
pub trait CredentialHandler {
    /// # Errors
    /// Returns an error only if the resulting token cannot be persisted.
    async fn credential_received(
        &mut self,
        credential: IdentityCredential,
    ) -> Result<Outcome, StoreError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonText {
    SignupWith,
    SigninWith,
}

/// Rendering options passed to the widget's button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub theme: &'static str,
    pub size: &'static str,
    pub text: ButtonText,
    pub shape: &'static str,
    pub logo_alignment: &'static str,
}

impl ButtonOptions {
    #[must_use]
    pub fn new(text: ButtonText) -> Self {
        Self {
            kind: "standard",
            theme: "outline",
            size: "large",
            text,
            shape: "rectangular",
            logo_alignment: "left",
        }
    }
}

/// An initialized identity widget.
#[derive(Clone, Debug)]
pub struct IdentityWidget {
    client_id: String,
    button: ButtonOptions,
}

impl IdentityWidget {
    /// # Errors
    /// Returns [`WidgetError::Unavailable`] when `client_id` is blank.
    pub fn initialize(client_id: &str, text: ButtonText) -> Result<Self, WidgetError> {
        let client_id = client_id.trim();
        if client_id.is_empty() {
            return Err(WidgetError::Unavailable);
        }
        Ok(Self {
            client_id: client_id.to_string(),
            button: ButtonOptions::new(text),
        })
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn render_button(&self) -> &ButtonOptions {
        &self.button
    }

    /// Plays the widget callback: wraps `raw` and hands it to `handler` unchanged.
    ///
    /// # Errors
    /// Propagates the handler's storage error.
    pub async fn dispatch<H: CredentialHandler>(
        &self,
        handler: &mut H,
        raw: &str,
    ) -> Result<Outcome, StoreError> {
        debug!(client_id = %self.client_id, "credential received");
        handler
            .credential_received(IdentityCredential::new(raw))
            .await
    }
}

/// Sign-up page adapter: starts a federated registration.
pub struct GoogleSignUp<'a, S> {
    pub flow: GoogleSignUpFlow,
    pub client: &'a AuthClient,
    pub store: &'a mut TokenStore<S>,
    pub error: &'a mut Label,
}

impl<S: KeyValueStore> CredentialHandler for GoogleSignUp<'_, S> {
    async fn credential_received(
        &mut self,
        credential: IdentityCredential,
    ) -> Result<Outcome, StoreError> {
        self.flow
            .submit(credential.id_token(), self.error, self.client, self.store)
            .await
    }
}

/// Sign-in page adapter: federated sign-in.
pub struct GoogleSignIn<'a, S> {
    pub flow: SignInFlow,
    pub client: &'a AuthClient,
    pub store: &'a mut TokenStore<S>,
    pub error: &'a mut Label,
}

impl<S: KeyValueStore> CredentialHandler for GoogleSignIn<'_, S> {
    async fn credential_received(
        &mut self,
        credential: IdentityCredential,
    ) -> Result<Outcome, StoreError> {
        self.flow
            .federated(credential.id_token(), self.error, self.client, self.store)
            .await
    }
}
