//! HTTP client for the backend auth routes. One method per route: each builds the
//! JSON body, sends it, and checks both failure channels (HTTP status and a body
//! `error_code`) before decoding the success shape.
//!
//! Secrets are exposed only while the request body or header is built; nothing in
//! this module logs request bodies.

pub mod codes;
mod error;
pub mod types;

pub use codes::{
    CompleteErrorCode, ErrorCode, SendSmsErrorCode, SignInErrorCode, StartErrorCode,
    VerifySmsErrorCode,
};
pub use error::ApiError;
pub use types::{PasswordSignUp, Session, SignUpStarted, SignedIn};

use crate::{APP_USER_AGENT, phone::SmsCode};
use anyhow::{Result, anyhow};
use reqwest::{Client, Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::{Instrument, debug, info_span};
use types::{
    CompleteRequest, Empty, SendSmsRequest, SessionResponse, SignInRequest, SignUpStartRequest,
    StartResponse, TokenResponse, VerifySmsRequest,
};
use url::Url;

pub const SIGN_UP_START_PATH: &str = "/auth/sign-up/start";
pub const SEND_SMS_PATH: &str = "/auth/sign-up/send-sms";
pub const VERIFY_SMS_PATH: &str = "/auth/sign-up/verify-sms";
pub const COMPLETE_PATH: &str = "/auth/sign-up/complete";
pub const SIGN_IN_PATH: &str = "/auth/sign-in";
pub const SESSION_PATH: &str = "/auth/me";

#[derive(Clone, Debug)]
pub struct AuthClient {
    http: Client,
    base_url: String,
}

impl AuthClient {
    /// Build a client for the backend at `base_url`.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url.trim())?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
        }

        let http = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts a password registration.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, non-success status or a body `error_code`.
    pub async fn start_password_sign_up(
        &self,
        sign_up: &PasswordSignUp<'_>,
    ) -> Result<SignUpStarted, ApiError<StartErrorCode>> {
        let body = SignUpStartRequest::Password {
            email: sign_up.email,
            password: sign_up.password.expose_secret(),
            name: sign_up.name,
            captcha_token: sign_up.captcha_token.expose_secret(),
        };
        let response: StartResponse = self
            .send(Method::POST, SIGN_UP_START_PATH, &body, None)
            .await?;
        Ok(SignUpStarted {
            sign_up_token: SecretString::from(response.sign_up_token),
        })
    }

    /// Starts a registration from a federated identity token.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, non-success status or a body `error_code`.
    pub async fn start_google_sign_up(
        &self,
        id_token: &SecretString,
    ) -> Result<SignUpStarted, ApiError<StartErrorCode>> {
        let body = SignUpStartRequest::Google {
            id_token: id_token.expose_secret(),
        };
        let response: StartResponse = self
            .send(Method::POST, SIGN_UP_START_PATH, &body, None)
            .await?;
        Ok(SignUpStarted {
            sign_up_token: SecretString::from(response.sign_up_token),
        })
    }

    /// Requests an SMS code for the registration identified by `uuid`.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, non-success status or a body `error_code`.
    pub async fn send_sms(
        &self,
        uuid: &SecretString,
        phone_num: &str,
    ) -> Result<(), ApiError<SendSmsErrorCode>> {
        let body = SendSmsRequest {
            uuid: uuid.expose_secret(),
            phone_num,
        };
        let _: Empty = self.send(Method::POST, SEND_SMS_PATH, &body, None).await?;
        Ok(())
    }

    /// Submits the SMS code for verification.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, non-success status or a body `error_code`.
    pub async fn verify_sms(
        &self,
        uuid: &SecretString,
        code: &SmsCode,
    ) -> Result<(), ApiError<VerifySmsErrorCode>> {
        let body = VerifySmsRequest {
            uuid: uuid.expose_secret(),
            code: code.as_str(),
        };
        let _: Empty = self.send(Method::POST, VERIFY_SMS_PATH, &body, None).await?;
        Ok(())
    }

    /// Finalizes a verified registration and returns the session token.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, non-success status or a body `error_code`.
    pub async fn complete_sign_up(
        &self,
        uuid: &SecretString,
    ) -> Result<SignedIn, ApiError<CompleteErrorCode>> {
        let body = CompleteRequest {
            uuid: uuid.expose_secret(),
        };
        let response: TokenResponse = self.send(Method::POST, COMPLETE_PATH, &body, None).await?;
        Ok(signed_in(response))
    }

    /// Password sign-in.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, non-success status or a body `error_code`.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SignedIn, ApiError<SignInErrorCode>> {
        let body = SignInRequest::Password {
            email,
            password: password.expose_secret(),
        };
        let response: TokenResponse = self.send(Method::POST, SIGN_IN_PATH, &body, None).await?;
        Ok(signed_in(response))
    }

    /// Federated sign-in with an identity token.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, non-success status or a body `error_code`.
    pub async fn google_sign_in(
        &self,
        id_token: &SecretString,
    ) -> Result<SignedIn, ApiError<SignInErrorCode>> {
        let body = SignInRequest::Google {
            id_token: id_token.expose_secret(),
        };
        let response: TokenResponse = self.send(Method::POST, SIGN_IN_PATH, &body, None).await?;
        Ok(signed_in(response))
    }

    /// Checks a session token against the backend.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure or when the token is rejected.
    pub async fn verify_session(
        &self,
        token: &SecretString,
    ) -> Result<Session, ApiError<SignInErrorCode>> {
        let response: SessionResponse = self
            .send(Method::GET, SESSION_PATH, &(), Some(token))
            .await?;
        Ok(Session {
            user_data: response.user_data.filter(|data| !data.is_null()),
        })
    }

    async fn send<B, T, C>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        bearer: Option<&SecretString>,
    ) -> Result<T, ApiError<C>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        C: ErrorCode,
    {
        let url = self.url(path);
        let span = info_span!("auth.request", http.method = %method, url = %url);

        let mut request = self.http.request(method.clone(), &url);
        if method != Method::GET {
            request = request.json(body);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .instrument(span)
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        read_response(response).await
    }
}

fn signed_in(response: TokenResponse) -> SignedIn {
    SignedIn {
        jwt_token: SecretString::from(response.jwt_token),
        user_data: response.user_data.filter(|data| !data.is_null()),
    }
}

async fn read_response<T, C>(response: Response) -> Result<T, ApiError<C>>
where
    T: DeserializeOwned,
    C: ErrorCode,
{
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !status.is_success() {
        let code = serde_json::from_str::<Value>(&text)
            .ok()
            .as_ref()
            .and_then(error_code)
            .map(C::from_code);
        debug!(status = status.as_u16(), ?code, "request failed");
        return Err(ApiError::Http {
            status: status.as_u16(),
            code,
        });
    }

    let body: Value = if text.trim().is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(&text)
            .map_err(|err| ApiError::Decode(format!("Failed to decode response: {err}")))?
    };

    if let Some(code) = error_code(&body) {
        let code = C::from_code(code);
        debug!(?code, "request rejected");
        return Err(ApiError::Rejected(code));
    }

    serde_json::from_value(body)
        .map_err(|err| ApiError::Decode(format!("Failed to decode response: {err}")))
}

fn error_code(body: &Value) -> Option<&str> {
    body.get("error_code")
        .and_then(Value::as_str)
        .filter(|code| !code.is_empty())
}
