//! # Getly (sign-up and sign-in client)
//!
//! `getly` drives the multi-step authentication flow of the Getly backend from the
//! client side. All credential storage, token issuance and SMS delivery live on the
//! backend; this crate collects input, validates it, forwards it to fixed routes and
//! keeps the resulting tokens in persistent key-value storage.
//!
//! ## Sign-up
//!
//! 1. **Start:** email, password, full name and a CAPTCHA response are validated and
//!    posted to `/auth/sign-up/start`. The returned sign-up token is stored under
//!    `user_uuid`.
//! 2. **Phone:** the phone number is normalized to `+972` form and posted with the
//!    sign-up token to `/auth/sign-up/send-sms`.
//! 3. **Verify:** the 6-digit code is posted to `/auth/sign-up/verify-sms`, immediately
//!    followed by `/auth/sign-up/complete`, which returns the session token.
//!
//! ## Sign-in and route guarding
//!
//! Password and federated sign-in store the returned session token under `jwt_token`.
//! The route guard checks that token against `/auth/me` on every page load and redirects
//! between protected and public pages.
//!
//! Flow controllers never touch a real page: they operate on the page models in [`ui`]
//! and return an [`flows::Outcome`] describing where to navigate. The `getly` binary
//! renders those models in a terminal.

pub mod cli;
pub mod client;
pub mod config;
pub mod federated;
pub mod flows;
pub mod i18n;
pub mod phone;
pub mod store;
pub mod ui;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
