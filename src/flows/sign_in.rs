//! Sign-in page: password and federated sign-in. Backend error detail is not shown
//! here; every failure renders the same generic message.

use super::{DASHBOARD_PAGE, Outcome};
use crate::{
    client::{ApiError, AuthClient, SignInErrorCode, SignedIn},
    i18n::{Locale, Message},
    store::{KeyValueStore, StoreError, TokenStore},
    ui::{Label, SignInPage},
    validation::validate_email,
};
use secrecy::SecretString;
use tracing::{debug, instrument, warn};

#[derive(Clone, Copy, Debug, Default)]
pub struct SignInFlow {
    pub locale: Locale,
}

impl SignInFlow {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Handles a submit of the sign-in form.
    ///
    /// # Errors
    /// Returns an error only if the session token cannot be persisted.
    #[instrument(skip_all)]
    pub async fn submit<S: KeyValueStore>(
        &self,
        page: &mut SignInPage,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError> {
        page.error.clear();

        let email = page.email.value.trim().to_string();
        if email.is_empty() || page.password.value.is_empty() {
            page.error.show(Message::CredentialsRequired.text(self.locale));
            return Ok(Outcome::Stay);
        }
        if !validate_email(&email) {
            page.error.show(Message::EmailInvalid.text(self.locale));
            return Ok(Outcome::Stay);
        }

        let password = SecretString::from(page.password.value.clone());
        let result = client.login(&email, &password).await;
        self.finish(result, &mut page.error, Message::IncorrectCredentials, store)
    }

    /// Signs in with an identity token received from the identity widget.
    ///
    /// # Errors
    /// Returns an error only if the session token cannot be persisted.
    #[instrument(skip_all)]
    pub async fn federated<S: KeyValueStore>(
        &self,
        id_token: &SecretString,
        error: &mut Label,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError> {
        error.clear();
        let result = client.google_sign_in(id_token).await;
        self.finish(result, error, Message::FederatedSignInFailed, store)
    }

    fn finish<S: KeyValueStore>(
        &self,
        result: Result<SignedIn, ApiError<SignInErrorCode>>,
        error: &mut Label,
        failure: Message,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError> {
        match result {
            Ok(signed_in) => {
                store.save_token(&signed_in.jwt_token)?;
                if let Some(user_data) = &signed_in.user_data {
                    store.save_user_data(user_data)?;
                }
                debug!("signed in");
                Ok(Outcome::navigate(DASHBOARD_PAGE))
            }
            Err(err) => {
                warn!("sign-in failed: {err}");
                error.show(failure.text(self.locale));
                Ok(Outcome::Stay)
            }
        }
    }
}
