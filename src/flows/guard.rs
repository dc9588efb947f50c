//! Page-load guard. Protected pages require a session token the backend accepts;
//! public-only pages (sign-in, sign-up) send already authenticated users away.
//! This is a UX guard only; access control lives on the backend.

use super::Outcome;
use crate::{
    client::AuthClient,
    store::{KeyValueStore, StoreError, TokenStore},
};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Page declaration read from the page's configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Protected,
    Public,
}

impl FromStr for Behavior {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "protected" => Ok(Self::Protected),
            "public" => Ok(Self::Public),
            other => Err(format!("unknown page behavior: {other}")),
        }
    }
}

/// Token state discovered by the guard.
#[derive(Clone, Debug, PartialEq)]
pub enum GuardState {
    NoToken,
    TokenValid { user_data: Option<Value> },
    TokenInvalid,
}

/// Terminal result of a guard run.
#[derive(Clone, Debug, PartialEq)]
pub struct GuardResult {
    pub state: GuardState,
    pub outcome: Outcome,
}

impl GuardResult {
    /// User data exposed to a protected page that is allowed to render.
    #[must_use]
    pub fn current_user(&self) -> Option<&Value> {
        match (&self.state, &self.outcome) {
            (GuardState::TokenValid { user_data }, Outcome::Stay) => user_data.as_ref(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RouteGuard {
    pub behavior: Behavior,
    pub redirect: String,
}

impl RouteGuard {
    #[must_use]
    pub fn new(behavior: Behavior, redirect: &str) -> Self {
        Self {
            behavior,
            redirect: redirect.to_string(),
        }
    }

    /// Runs once per page load.
    ///
    /// # Errors
    /// Returns an error only if the token store cannot be read or written.
    #[instrument(skip_all, fields(behavior = ?self.behavior, redirect = %self.redirect))]
    pub async fn run<S: KeyValueStore>(
        &self,
        client: &AuthClient,
        store: &mut TokenStore<S>,
    ) -> Result<GuardResult, StoreError> {
        let Some(token) = store.get_token()? else {
            debug!("no session token");
            let outcome = match self.behavior {
                Behavior::Protected => Outcome::navigate(&self.redirect),
                Behavior::Public => Outcome::Stay,
            };
            return Ok(GuardResult {
                state: GuardState::NoToken,
                outcome,
            });
        };

        match client.verify_session(&token).await {
            Ok(session) => {
                if let Some(user_data) = &session.user_data {
                    store.save_user_data(user_data)?;
                }
                let outcome = match self.behavior {
                    Behavior::Protected => Outcome::Stay,
                    Behavior::Public if session.user_data.is_some() => {
                        Outcome::navigate(&self.redirect)
                    }
                    Behavior::Public => Outcome::Stay,
                };
                Ok(GuardResult {
                    state: GuardState::TokenValid {
                        user_data: session.user_data,
                    },
                    outcome,
                })
            }
            Err(err) => {
                warn!("session check failed, clearing token: {err}");
                store.remove_token()?;
                let outcome = match self.behavior {
                    Behavior::Protected => Outcome::navigate(&self.redirect),
                    Behavior::Public => Outcome::Stay,
                };
                Ok(GuardResult {
                    state: GuardState::TokenInvalid,
                    outcome,
                })
            }
        }
    }
}
