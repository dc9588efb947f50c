//! First sign-up step: validate the profile form, start the registration and hand
//! the sign-up token to the phone step.

use super::{Outcome, PHONE_PAGE, raw_reason};
use crate::{
    client::{ApiError, AuthClient, ErrorCode, PasswordSignUp, StartErrorCode},
    i18n::{self, Locale, Message},
    store::{KeyValueStore, StoreError, TokenStore},
    ui::{Field, Label, SignUpPage},
    validation::{validate_email, validate_full_name, validate_password},
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
pub enum CaptchaError {
    #[error("CAPTCHA widget is not available")]
    Unavailable,
}

/// The embedded CAPTCHA widget.
pub trait Captcha {
    /// The response token; empty when the challenge has not been solved.
    ///
    /// # Errors
    /// Returns an error when the widget failed to load.
    fn response(&self) -> Result<SecretString, CaptchaError>;

    fn reset(&mut self);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SignUpFlow {
    pub locale: Locale,
}

impl SignUpFlow {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    fn text(&self, message: Message) -> &'static str {
        message.text(self.locale)
    }

    /// Handles a submit of the sign-up form.
    ///
    /// # Errors
    /// Returns an error only if the sign-up token cannot be persisted.
    #[instrument(skip_all)]
    pub async fn submit<S, C>(
        &self,
        page: &mut SignUpPage,
        captcha: &mut C,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError>
    where
        S: KeyValueStore,
        C: Captcha,
    {
        page.errors.clear_all_field_errors();
        page.server_error.clear();

        let Some(captcha_token) = self.validate(page, captcha) else {
            if let Some(first) = page.errors.failing().first() {
                page.focus(*first);
            }
            debug!(failing = ?page.errors.failing(), "sign-up form rejected");
            return Ok(Outcome::Stay);
        };

        page.submit.disabled = true;
        page.submit.label = self.text(Message::SubmitLoading).to_string();

        let password = SecretString::from(page.password.value.clone());
        let email = page.email.value.trim().to_string();
        let name = page.name.value.trim().to_string();
        let result = client
            .start_password_sign_up(&PasswordSignUp {
                email: &email,
                password: &password,
                name: &name,
                captcha_token: &captcha_token,
            })
            .await;

        let outcome = match result {
            Ok(started) => store.save_sign_up_token(&started.sign_up_token).map(|()| {
                debug!("sign-up started");
                page.reset();
                Outcome::navigate(PHONE_PAGE)
            }),
            Err(err) => {
                warn!("sign-up start failed: {err}");
                self.render_error(page, &err);
                Ok(Outcome::Stay)
            }
        };

        captcha.reset();
        page.submit.disabled = false;
        page.submit.label = self.text(Message::SubmitSignUp).to_string();

        outcome
    }

    /// Runs every field check, rendering all failures. Returns the CAPTCHA token
    /// when the whole form is valid.
    fn validate<C: Captcha>(&self, page: &mut SignUpPage, captcha: &C) -> Option<SecretString> {
        let email = page.email.value.trim();
        if email.is_empty() {
            page.errors
                .show_field_error(Field::Email, self.text(Message::EmailRequired));
        } else if !validate_email(email) {
            page.errors
                .show_field_error(Field::Email, self.text(Message::EmailInvalid));
        }

        let password = page.password.value.as_str();
        if password.is_empty() {
            page.errors
                .show_field_error(Field::Password, self.text(Message::PasswordRequired));
        } else if !validate_password(password) {
            page.errors
                .show_field_error(Field::Password, self.text(Message::PasswordTooShort));
        }

        let name = page.name.value.trim();
        if name.is_empty() {
            page.errors
                .show_field_error(Field::Name, self.text(Message::NameRequired));
        } else if !validate_full_name(name) {
            page.errors
                .show_field_error(Field::Name, self.text(Message::NameInvalid));
        }

        let token = match captcha.response() {
            Ok(token) if !token.expose_secret().is_empty() => Some(token),
            Ok(_) => {
                page.errors
                    .show_field_error(Field::Captcha, self.text(Message::CaptchaMissing));
                None
            }
            Err(err) => {
                warn!("{err}");
                page.errors
                    .show_field_error(Field::Captcha, self.text(Message::CaptchaUnavailable));
                None
            }
        };

        if page.errors.is_empty() { token } else { None }
    }

    fn render_error(&self, page: &mut SignUpPage, err: &ApiError<StartErrorCode>) {
        if err.is_network() {
            page.server_error.show(self.text(Message::NetworkError));
            return;
        }

        match err.code() {
            Some(StartErrorCode::CaptchaVerificationFailed) => {
                page.server_error.show(self.text(Message::CaptchaFailed));
            }
            Some(StartErrorCode::EmailAlreadyExists) => {
                page.errors
                    .show_field_error(Field::Email, self.text(Message::EmailAlreadyExists));
            }
            Some(StartErrorCode::InternalError) => {
                page.server_error.show(self.text(Message::InternalErrorLater));
            }
            Some(code) => {
                page.server_error
                    .show(i18n::unknown_error(self.locale, code.as_code()));
            }
            None => {
                page.server_error
                    .show(i18n::unknown_error(self.locale, &raw_reason(err)));
            }
        }
    }
}

/// Federated sign-up: the identity token replaces the profile form.
#[derive(Clone, Copy, Debug, Default)]
pub struct GoogleSignUpFlow {
    pub locale: Locale,
}

impl GoogleSignUpFlow {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Starts a registration from an identity token and continues to the phone step.
    ///
    /// # Errors
    /// Returns an error only if the sign-up token cannot be persisted.
    #[instrument(skip_all)]
    pub async fn submit<S: KeyValueStore>(
        &self,
        id_token: &SecretString,
        error: &mut Label,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError> {
        error.clear();
        match client.start_google_sign_up(id_token).await {
            Ok(started) => {
                store.save_sign_up_token(&started.sign_up_token)?;
                debug!("federated sign-up started");
                Ok(Outcome::navigate(PHONE_PAGE))
            }
            Err(err) => {
                warn!("federated sign-up failed: {err}");
                error.show(Message::FederatedSignInFailed.text(self.locale));
                Ok(Outcome::Stay)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::SIGN_UP_START_PATH;
    use crate::store::{MemoryStore, SIGN_UP_TOKEN_KEY};
    use anyhow::Result;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[derive(Default)]
    struct FakeCaptcha {
        token: Option<&'static str>,
        resets: usize,
    }

    impl Captcha for FakeCaptcha {
        fn response(&self) -> Result<SecretString, CaptchaError> {
            self.token
                .map(SecretString::from)
                .ok_or(CaptchaError::Unavailable)
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn solved() -> FakeCaptcha {
        FakeCaptcha {
            token: Some("captcha"),
            resets: 0,
        }
    }

    async fn start_mock(server: &MockServer, status: u16, body: serde_json::Value, calls: u64) {
        Mock::given(method("POST"))
            .and(path(SIGN_UP_START_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn invalid_fields_are_all_reported_and_first_is_focused() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        start_mock(&server, 200, json!({}), 0).await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = TokenStore::new(MemoryStore::default());
        let mut page = SignUpPage::new("jane@example.com", "12345", "Jane");
        let mut captcha = solved();
        let flow = SignUpFlow::new(Locale::English);

        let outcome = flow.submit(&mut page, &mut captcha, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(page.errors.failing(), vec![Field::Password, Field::Name]);
        assert_eq!(
            page.errors.message(Field::Password),
            Some("Password must contain at least 6 characters.")
        );
        assert_eq!(
            page.errors.message(Field::Name),
            Some("Please enter your full name (first and last name).")
        );
        assert_eq!(page.focused, Some(Field::Password));
        assert!(page.password.focused);
        assert!(!page.submit.disabled);
        Ok(())
    }

    #[tokio::test]
    async fn empty_form_reports_required_messages() -> Result<()> {
        let client = AuthClient::new("http://127.0.0.1:9")?;
        let mut store = TokenStore::new(MemoryStore::default());
        let mut page = SignUpPage::new("  ", "", "");
        let mut captcha = FakeCaptcha::default();
        let flow = SignUpFlow::new(Locale::English);

        let outcome = flow.submit(&mut page, &mut captcha, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(page.errors.failing(), Field::ALL.to_vec());
        assert_eq!(
            page.errors.message(Field::Email),
            Some("Please enter an email address.")
        );
        assert_eq!(
            page.errors.message(Field::Captcha),
            Some("reCAPTCHA failed to load, please refresh the page.")
        );
        assert_eq!(page.focused, Some(Field::Email));
        Ok(())
    }

    #[tokio::test]
    async fn unsolved_captcha_is_a_field_error() -> Result<()> {
        let client = AuthClient::new("http://127.0.0.1:9")?;
        let mut store = TokenStore::new(MemoryStore::default());
        let mut page = SignUpPage::new("jane@example.com", "hunter22", "Jane Doe");
        let mut captcha = FakeCaptcha {
            token: Some(""),
            resets: 0,
        };
        let flow = SignUpFlow::new(Locale::Hebrew);

        let outcome = flow.submit(&mut page, &mut captcha, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(page.errors.failing(), vec![Field::Captcha]);
        assert_eq!(
            page.errors.message(Field::Captcha),
            Some(Message::CaptchaMissing.text(Locale::Hebrew))
        );
        assert_eq!(page.focused, Some(Field::Captcha));
        assert!(page.server_error.text.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn success_stores_sign_up_token_and_moves_to_phone_step() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SIGN_UP_START_PATH))
            .and(body_json(json!({
                "method": "password",
                "email": "jane@example.com",
                "password": "hunter22",
                "name": "Jane Doe",
                "captcha_token": "captcha"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sign_up_token": "abc"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = TokenStore::new(MemoryStore::default());
        let mut page = SignUpPage::new(" jane@example.com ", "hunter22", "Jane Doe");
        let mut captcha = solved();
        let flow = SignUpFlow::new(Locale::Hebrew);

        let outcome = flow.submit(&mut page, &mut captcha, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::navigate(PHONE_PAGE));
        assert_eq!(
            store.inner().get(SIGN_UP_TOKEN_KEY)?,
            Some("abc".to_string())
        );
        assert!(page.email.value.is_empty());
        assert_eq!(captcha.resets, 1);
        assert!(!page.submit.disabled);
        assert_eq!(page.submit.label, Message::SubmitSignUp.text(Locale::Hebrew));
        Ok(())
    }

    #[tokio::test]
    async fn email_already_exists_is_an_email_field_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        start_mock(&server, 409, json!({"error_code": "email_already_exists"}), 1).await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = TokenStore::new(MemoryStore::default());
        let mut page = SignUpPage::new("jane@example.com", "hunter22", "Jane Doe");
        let mut captcha = solved();
        let flow = SignUpFlow::new(Locale::English);

        let outcome = flow.submit(&mut page, &mut captcha, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(
            page.errors.message(Field::Email),
            Some("This email is already registered.")
        );
        assert!(!page.server_error.is_shown());
        assert!(store.sign_up_token()?.is_none());
        assert_eq!(captcha.resets, 1);
        Ok(())
    }

    #[tokio::test]
    async fn known_and_unknown_codes_render_form_messages() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let cases = [
            ("captcha_verification_failed", "CAPTCHA verification failed. Please try again."),
            ("internal_error", "An internal error occurred, please try again later."),
            ("something_new", "Unknown error: something_new"),
        ];

        for (code, expected) in cases {
            let server = MockServer::start().await;
            start_mock(&server, 200, json!({"error_code": code}), 1).await;

            let client = AuthClient::new(&server.uri())?;
            let mut store = TokenStore::new(MemoryStore::default());
            let mut page = SignUpPage::new("jane@example.com", "hunter22", "Jane Doe");
            let mut captcha = solved();
            let flow = SignUpFlow::new(Locale::English);

            let outcome = flow.submit(&mut page, &mut captcha, &client, &mut store).await?;

            assert_eq!(outcome, Outcome::Stay);
            assert_eq!(page.server_error.text, expected);
            assert!(!page.submit.disabled);
        }
        Ok(())
    }

    #[tokio::test]
    async fn network_failure_shows_connectivity_message() -> Result<()> {
        let client = AuthClient::new("http://127.0.0.1:9")?;
        let mut store = TokenStore::new(MemoryStore::default());
        let mut page = SignUpPage::new("jane@example.com", "hunter22", "Jane Doe");
        let mut captcha = solved();
        let flow = SignUpFlow::new(Locale::English);

        let outcome = flow.submit(&mut page, &mut captcha, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(page.server_error.text, "Network error. Please try again later.");
        assert!(!page.submit.disabled);
        Ok(())
    }

    #[tokio::test]
    async fn google_sign_up_continues_to_phone_step() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SIGN_UP_START_PATH))
            .and(body_json(json!({"method": "google", "id_token": "id-token"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sign_up_token": "g-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = TokenStore::new(MemoryStore::default());
        let mut error = Label::default();
        let flow = GoogleSignUpFlow::new(Locale::English);

        let outcome = flow
            .submit(&SecretString::from("id-token"), &mut error, &client, &mut store)
            .await?;

        assert_eq!(outcome, Outcome::navigate(PHONE_PAGE));
        assert_eq!(
            store.sign_up_token()?.map(|t| t.expose_secret().to_string()),
            Some("g-1".to_string())
        );
        assert!(!error.is_shown());
        Ok(())
    }

    #[tokio::test]
    async fn google_sign_up_failure_shows_generic_message() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        start_mock(&server, 401, json!({"error_code": "invalid_token"}), 1).await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = TokenStore::new(MemoryStore::default());
        let mut error = Label::default();
        let flow = GoogleSignUpFlow::new(Locale::English);

        let outcome = flow
            .submit(&SecretString::from("id-token"), &mut error, &client, &mut store)
            .await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(error.text, "Google sign-in failed.");
        assert!(store.sign_up_token()?.is_none());
        Ok(())
    }
}
