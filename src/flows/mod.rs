//! Flow controllers, one per page script. Each takes its page model, the token
//! store and the auth client explicitly and returns where the browser should go
//! next. Backend and network failures are rendered into the page model; only
//! storage failures are returned as errors.

pub mod guard;
pub mod phone;
pub mod sign_in;
pub mod sign_up;

use crate::client::{ApiError, ErrorCode};

pub use guard::{Behavior, GuardResult, GuardState, RouteGuard};
pub use phone::PhoneFlow;
pub use sign_in::SignInFlow;
pub use sign_up::{Captcha, CaptchaError, GoogleSignUpFlow, SignUpFlow};

/// First step of sign-up.
pub const SIGN_UP_PAGE: &str = "./sign-up.html";
/// Phone number and code entry.
pub const PHONE_PAGE: &str = "./phone-number.html";
/// Landing page after any successful authentication.
pub const DASHBOARD_PAGE: &str = "dashboard.html";
/// Password and federated sign-in.
pub const SIGN_IN_PAGE: &str = "./sign-in.html";

/// What the page does once a controller returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Stay,
    Navigate(String),
}

impl Outcome {
    #[must_use]
    pub fn navigate(target: &str) -> Self {
        Self::Navigate(target.to_string())
    }

    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Stay => None,
            Self::Navigate(target) => Some(target),
        }
    }
}

/// Best available description of a failure for messages that show the raw reason.
pub(crate) fn raw_reason<C: ErrorCode>(err: &ApiError<C>) -> String {
    match err {
        ApiError::Http { status, code: None } => format!("HTTP {status}"),
        ApiError::Decode(message) | ApiError::Network(message) => message.clone(),
        ApiError::Http {
            code: Some(code), ..
        }
        | ApiError::Rejected(code) => code.as_code().to_string(),
    }
}
