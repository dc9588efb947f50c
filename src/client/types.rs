//! Request and response bodies of the backend auth routes. Requests carry
//! credentials, so they implement neither `Debug` nor `Clone` and must never be
//! logged.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub(crate) enum SignUpStartRequest<'a> {
    Password {
        email: &'a str,
        password: &'a str,
        name: &'a str,
        captcha_token: &'a str,
    },
    Google {
        id_token: &'a str,
    },
}

#[derive(Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub(crate) enum SignInRequest<'a> {
    Password { email: &'a str, password: &'a str },
    Google { id_token: &'a str },
}

#[derive(Serialize)]
pub(crate) struct SendSmsRequest<'a> {
    pub uuid: &'a str,
    pub phone_num: &'a str,
}

#[derive(Serialize)]
pub(crate) struct VerifySmsRequest<'a> {
    pub uuid: &'a str,
    pub code: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CompleteRequest<'a> {
    pub uuid: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct StartResponse {
    pub sign_up_token: String,
}

#[derive(Deserialize)]
pub(crate) struct Empty {}

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub jwt_token: String,
    #[serde(default)]
    pub user_data: Option<Value>,
}

#[derive(Deserialize)]
pub(crate) struct SessionResponse {
    #[serde(default)]
    pub user_data: Option<Value>,
}

/// Password sign-up input, already validated by the form.
pub struct PasswordSignUp<'a> {
    pub email: &'a str,
    pub password: &'a SecretString,
    pub name: &'a str,
    pub captcha_token: &'a SecretString,
}

/// A registration that is started but not yet complete.
#[derive(Debug)]
pub struct SignUpStarted {
    pub sign_up_token: SecretString,
}

/// A session token, with user data when the route returns it.
#[derive(Debug)]
pub struct SignedIn {
    pub jwt_token: SecretString,
    pub user_data: Option<Value>,
}

/// Result of a successful session check.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user_data: Option<Value>,
}
