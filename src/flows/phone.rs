//! Phone step of sign-up: send (and resend) the SMS code, verify it, then complete
//! the registration. All attempt counting and expiry happen on the backend; this
//! controller only renders the error code it receives.

use super::{DASHBOARD_PAGE, Outcome, SIGN_UP_PAGE, raw_reason};
use crate::{
    client::{AuthClient, CompleteErrorCode, SendSmsErrorCode, VerifySmsErrorCode},
    i18n::{self, Locale, Message},
    phone::{self, SmsCode},
    store::{KeyValueStore, StoreError, TokenStore},
    ui::{Label, PhonePage},
};
use tracing::{debug, instrument, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SendTarget {
    /// First send from the phone form; success reveals the code form.
    PhoneForm,
    /// Resend button; success shows a confirmation.
    Resend,
}

/// Flow-local state of the phone page. Lives as long as the page does.
#[derive(Clone, Debug, Default)]
pub struct PhoneFlow {
    locale: Locale,
    validated_phone: Option<String>,
}

impl PhoneFlow {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            validated_phone: None,
        }
    }

    /// Number accepted by the last successful phone submission or [`Self::remember_phone`].
    #[must_use]
    pub fn validated_phone(&self) -> Option<&str> {
        self.validated_phone.as_deref()
    }

    /// Normalizes and keeps `raw` for later resends. Returns `false` for invalid input.
    pub fn remember_phone(&mut self, raw: &str) -> bool {
        match phone::normalize(raw) {
            Some(formatted) => {
                self.validated_phone = Some(formatted);
                true
            }
            None => false,
        }
    }

    fn text(&self, message: Message) -> &'static str {
        message.text(self.locale)
    }

    /// Handles a submit of the phone form.
    ///
    /// # Errors
    /// Returns an error only if the token store cannot be read or written.
    #[instrument(skip_all)]
    pub async fn submit_phone<S: KeyValueStore>(
        &mut self,
        page: &mut PhonePage,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError> {
        page.phone_error.clear();

        if !self.remember_phone(&page.phone.value) {
            page.phone_error.show(self.text(Message::PhoneInvalid));
            return Ok(Outcome::Stay);
        }

        self.send(page, SendTarget::PhoneForm, client, store).await
    }

    /// Handles a click on the resend button. The button is disabled while its own
    /// request is in flight.
    ///
    /// # Errors
    /// Returns an error only if the token store cannot be read or written.
    #[instrument(skip_all)]
    pub async fn resend<S: KeyValueStore>(
        &mut self,
        page: &mut PhonePage,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError> {
        page.resend.disabled = true;
        page.resend_error.clear();

        let outcome = self.send(page, SendTarget::Resend, client, store).await;

        page.resend.disabled = false;
        outcome
    }

    async fn send<S: KeyValueStore>(
        &self,
        page: &mut PhonePage,
        target: SendTarget,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError> {
        let Some(uuid) = store.sign_up_token()? else {
            debug!("no sign-up in progress");
            return Ok(Outcome::navigate(SIGN_UP_PAGE));
        };

        let Some(phone) = self.validated_phone.clone() else {
            feedback(page, target).show(self.text(Message::PhoneInvalid));
            return Ok(Outcome::Stay);
        };

        feedback(page, target).show(self.text(Message::Sending));

        let err = match client.send_sms(&uuid, &phone).await {
            Ok(()) => {
                debug!(?target, "sms sent");
                match target {
                    SendTarget::PhoneForm => {
                        page.phone_error.clear();
                        page.phone_form_visible = false;
                        page.code_form_visible = true;
                    }
                    SendTarget::Resend => {
                        page.resend_error.show(self.text(Message::CodeResent));
                    }
                }
                return Ok(Outcome::Stay);
            }
            Err(err) => err,
        };

        warn!("send-sms failed: {err}");
        let message = if err.is_network() {
            Message::NetworkError
        } else {
            match err.code() {
                Some(SendSmsErrorCode::SessionNotFound) => {
                    feedback(page, target).show(self.text(Message::SignUpNotFound));
                    store.clear_sign_up_token()?;
                    return Ok(Outcome::navigate(SIGN_UP_PAGE));
                }
                Some(SendSmsErrorCode::SmsAlreadyVerified) => Message::SmsAlreadyVerified,
                Some(SendSmsErrorCode::PhoneNumNotMatching) => Message::PhoneNotMatching,
                Some(SendSmsErrorCode::NeedToWaitBeforeResend) => Message::WaitBeforeResend,
                Some(SendSmsErrorCode::InvalidNumber) => Message::InvalidNumber,
                Some(SendSmsErrorCode::ApiError) => Message::SmsProviderError,
                Some(SendSmsErrorCode::InternalError | SendSmsErrorCode::Unknown(_)) | None => {
                    Message::InternalError
                }
            }
        };
        feedback(page, target).show(self.text(message));
        Ok(Outcome::Stay)
    }

    /// Handles a submit of the code form: verify, then complete the registration.
    ///
    /// # Errors
    /// Returns an error only if the token store cannot be read or written.
    #[instrument(skip_all)]
    pub async fn submit_code<S: KeyValueStore>(
        &self,
        page: &mut PhonePage,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<Outcome, StoreError> {
        page.code_error.clear();
        page.success.clear();

        let Some(code) = SmsCode::parse(&page.code.code()) else {
            page.code_error.show(self.text(Message::CodeFormat));
            return Ok(Outcome::Stay);
        };

        let Some(uuid) = store.sign_up_token()? else {
            debug!("no sign-up in progress");
            return Ok(Outcome::navigate(SIGN_UP_PAGE));
        };

        if let Err(err) = client.verify_sms(&uuid, &code).await {
            warn!("verify-sms failed: {err}");
            let message = if err.is_network() {
                Message::NetworkCheckConnection
            } else {
                match err.code() {
                    Some(VerifySmsErrorCode::WrongCode) => {
                        page.code.clear();
                        page.code.focus_first();
                        Message::WrongCode
                    }
                    Some(VerifySmsErrorCode::TooManyAttempts) => Message::TooManyAttempts,
                    Some(VerifySmsErrorCode::NeedToResendCode) => Message::CodeExpired,
                    Some(VerifySmsErrorCode::SessionNotFound) => {
                        page.alert = Some(self.text(Message::SessionExpired).to_string());
                        store.clear_sign_up_token()?;
                        return Ok(Outcome::navigate(SIGN_UP_PAGE));
                    }
                    Some(VerifySmsErrorCode::InternalError | VerifySmsErrorCode::Unknown(_))
                    | None => Message::ServerError,
                }
            };
            page.code_error.show(self.text(message));
            return Ok(Outcome::Stay);
        }

        match client.complete_sign_up(&uuid).await {
            Ok(signed_in) => {
                store.save_token(&signed_in.jwt_token)?;
                if let Some(user_data) = &signed_in.user_data {
                    store.save_user_data(user_data)?;
                }
                store.clear_sign_up_token()?;
                debug!("sign-up complete");
                Ok(Outcome::navigate(DASHBOARD_PAGE))
            }
            Err(err) => {
                warn!("complete failed: {err}");
                if matches!(err.code(), Some(CompleteErrorCode::SessionNotFound)) {
                    page.alert = Some(self.text(Message::SessionExpired).to_string());
                    store.clear_sign_up_token()?;
                    return Ok(Outcome::navigate(SIGN_UP_PAGE));
                }
                let text = if err.is_network() {
                    self.text(Message::NetworkCheckConnection).to_string()
                } else {
                    i18n::sign_up_failed(self.locale, &raw_reason(&err))
                };
                page.code_error.show(text);
                Ok(Outcome::Stay)
            }
        }
    }
}

fn feedback(page: &mut PhonePage, target: SendTarget) -> &mut Label {
    match target {
        SendTarget::PhoneForm => &mut page.phone_error,
        SendTarget::Resend => &mut page.resend_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{COMPLETE_PATH, SEND_SMS_PATH, VERIFY_SMS_PATH};
    use crate::store::MemoryStore;
    use anyhow::Result;
    use secrecy::{ExposeSecret, SecretString};
    use serde_json::{Value, json};
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn store_with_sign_up(token: Option<&str>) -> Result<TokenStore<MemoryStore>> {
        let mut store = TokenStore::new(MemoryStore::default());
        if let Some(token) = token {
            store.save_sign_up_token(&SecretString::from(token))?;
        }
        Ok(store)
    }

    async fn mock_route(server: &MockServer, route: &str, status: u16, body: Value, calls: u64) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn invalid_phone_never_reaches_network() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(&server, SEND_SMS_PATH, 200, json!({}), 0).await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::with_phone("0601234567");
        let mut flow = PhoneFlow::new(Locale::English);

        let outcome = flow.submit_phone(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(page.phone_error.text, "Please enter a valid phone number.");
        assert!(flow.validated_phone().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn first_send_reveals_code_form() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SEND_SMS_PATH))
            .and(body_json(json!({"uuid": "uuid", "phone_num": "+972501234567"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error_code": null})))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::with_phone("050 123 4567");
        let mut flow = PhoneFlow::new(Locale::English);

        let outcome = flow.submit_phone(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert!(!page.phone_form_visible);
        assert!(page.code_form_visible);
        assert_eq!(flow.validated_phone(), Some("+972501234567"));
        Ok(())
    }

    #[tokio::test]
    async fn resend_shows_confirmation_and_reenables_button() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(&server, SEND_SMS_PATH, 200, json!({}), 1).await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::default();
        let mut flow = PhoneFlow::new(Locale::English);
        assert!(flow.remember_phone("0501234567"));

        let outcome = flow.resend(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(page.resend_error.text, "A new code was sent successfully!");
        assert!(!page.resend.disabled);
        assert!(page.phone_form_visible);
        Ok(())
    }

    #[tokio::test]
    async fn send_without_sign_up_redirects_without_network() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(&server, SEND_SMS_PATH, 200, json!({}), 0).await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(None)?;
        let mut page = PhonePage::with_phone("0501234567");
        let mut flow = PhoneFlow::new(Locale::English);

        let outcome = flow.submit_phone(&mut page, &client, &mut store).await?;
        assert_eq!(outcome, Outcome::navigate(SIGN_UP_PAGE));
        Ok(())
    }

    #[tokio::test]
    async fn send_error_codes_render_distinct_messages() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let cases = [
            ("sms_already_verified", Message::SmsAlreadyVerified),
            ("phone_num_not_matching", Message::PhoneNotMatching),
            ("need_to_wait_before_resend", Message::WaitBeforeResend),
            ("invalid_number", Message::InvalidNumber),
            ("api_error", Message::SmsProviderError),
            ("InternalError", Message::InternalError),
            ("never_seen_before", Message::InternalError),
        ];

        for (code, expected) in cases {
            let server = MockServer::start().await;
            mock_route(&server, SEND_SMS_PATH, 400, json!({"error_code": code}), 1).await;

            let client = AuthClient::new(&server.uri())?;
            let mut store = store_with_sign_up(Some("uuid"))?;
            let mut page = PhonePage::with_phone("0501234567");
            let mut flow = PhoneFlow::new(Locale::Hebrew);

            let outcome = flow.submit_phone(&mut page, &client, &mut store).await?;

            assert_eq!(outcome, Outcome::Stay, "{code}");
            assert_eq!(page.phone_error.text, expected.text(Locale::Hebrew), "{code}");
            assert!(page.phone_form_visible, "{code}");
            assert!(store.sign_up_token()?.is_some(), "{code}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn send_session_not_found_clears_and_restarts() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(
            &server,
            SEND_SMS_PATH,
            200,
            json!({"error_code": "session_not_found"}),
            1,
        )
        .await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::default();
        let mut flow = PhoneFlow::new(Locale::English);
        flow.remember_phone("+972501234567");

        let outcome = flow.resend(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::navigate(SIGN_UP_PAGE));
        assert!(store.sign_up_token()?.is_none());
        assert_eq!(page.resend_error.text, "No sign-up was found. Please start over.");
        assert!(!page.resend.disabled);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_code_is_rejected_locally() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(&server, VERIFY_SMS_PATH, 200, json!({}), 0).await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let flow = PhoneFlow::new(Locale::English);

        for code in ["12345", "12a456", "1234567"] {
            let mut page = PhonePage::with_code(code);
            let outcome = flow.submit_code(&mut page, &client, &mut store).await?;
            assert_eq!(outcome, Outcome::Stay);
            assert_eq!(page.code_error.text, "The code must contain exactly 6 digits.");
        }
        Ok(())
    }

    #[tokio::test]
    async fn wrong_code_clears_cells_and_focuses_first() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(
            &server,
            VERIFY_SMS_PATH,
            200,
            json!({"error_code": "wrong_code"}),
            1,
        )
        .await;
        mock_route(&server, COMPLETE_PATH, 200, json!({}), 0).await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::with_code("123456");
        let flow = PhoneFlow::new(Locale::English);

        let outcome = flow.submit_code(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(page.code_error.text, "Wrong code. Please try again.");
        assert!(page.code.cells.iter().all(|cell| cell.value.is_empty()));
        assert!(page.code.cells[0].focused);
        assert!(store.sign_up_token()?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn attempts_and_expiry_keep_entered_code() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let cases = [
            ("too_many_attempts", "Too many attempts. Please request a new code."),
            ("need_to_resend_code", "The code has expired. Please request a new code."),
            ("InternalError", "Server error. Please try again later."),
        ];

        for (code, expected) in cases {
            let server = MockServer::start().await;
            mock_route(&server, VERIFY_SMS_PATH, 200, json!({"error_code": code}), 1).await;

            let client = AuthClient::new(&server.uri())?;
            let mut store = store_with_sign_up(Some("uuid"))?;
            let mut page = PhonePage::with_code("123456");
            let flow = PhoneFlow::new(Locale::English);

            let outcome = flow.submit_code(&mut page, &client, &mut store).await?;

            assert_eq!(outcome, Outcome::Stay);
            assert_eq!(page.code_error.text, expected);
            assert_eq!(page.code.code(), "123456");
        }
        Ok(())
    }

    #[tokio::test]
    async fn verify_session_not_found_restarts_sign_up() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(
            &server,
            VERIFY_SMS_PATH,
            404,
            json!({"error_code": "session_not_found"}),
            1,
        )
        .await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::with_code("123456");
        let flow = PhoneFlow::new(Locale::English);

        let outcome = flow.submit_code(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::navigate(SIGN_UP_PAGE));
        assert!(page.alert.is_some());
        assert!(store.sign_up_token()?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn verified_code_completes_sign_up() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(VERIFY_SMS_PATH))
            .and(body_json(json!({"uuid": "uuid", "code": "123456"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error_code": null})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(COMPLETE_PATH))
            .and(body_json(json!({"uuid": "uuid"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jwt_token": "jwt",
                "user_data": {"name": "Jane Doe"},
                "error_code": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::with_code("123456");
        let flow = PhoneFlow::new(Locale::English);

        let outcome = flow.submit_code(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::navigate(DASHBOARD_PAGE));
        assert_eq!(
            store.get_token()?.map(|t| t.expose_secret().to_string()),
            Some("jwt".to_string())
        );
        assert_eq!(store.user_data()?, Some(json!({"name": "Jane Doe"})));
        assert!(store.sign_up_token()?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn complete_failure_shows_readable_code() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(&server, VERIFY_SMS_PATH, 200, json!({}), 1).await;
        mock_route(
            &server,
            COMPLETE_PATH,
            200,
            json!({"error_code": "code_not_verified"}),
            1,
        )
        .await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::with_code("123456");
        let flow = PhoneFlow::new(Locale::English);

        let outcome = flow.submit_code(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::Stay);
        assert_eq!(page.code_error.text, "Sign-up failed: code not verified");
        assert!(store.get_token()?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn complete_session_not_found_restarts_sign_up() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mock_route(&server, VERIFY_SMS_PATH, 200, json!({}), 1).await;
        mock_route(
            &server,
            COMPLETE_PATH,
            401,
            json!({"error_code": "session_not_found"}),
            1,
        )
        .await;

        let client = AuthClient::new(&server.uri())?;
        let mut store = store_with_sign_up(Some("uuid"))?;
        let mut page = PhonePage::with_code("123456");
        let flow = PhoneFlow::new(Locale::English);

        let outcome = flow.submit_code(&mut page, &client, &mut store).await?;

        assert_eq!(outcome, Outcome::navigate(SIGN_UP_PAGE));
        assert!(page.alert.is_some());
        assert!(!page.code_error.is_shown());
        assert!(store.sign_up_token()?.is_none());
        assert!(store.get_token()?.is_none());
        Ok(())
    }
}
