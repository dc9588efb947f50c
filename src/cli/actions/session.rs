use super::report::Report;
use crate::{
    cli::globals::GlobalArgs,
    flows::{Behavior, GuardState, RouteGuard, SIGN_IN_PAGE},
};
use anyhow::Result;
use tracing::debug;

/// Runs the page-load guard of a page declared with `behavior`.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn guard(behavior: Behavior, redirect: &str, globals: &GlobalArgs) -> Result<Report> {
    let client = globals.client()?;
    let mut store = globals.store()?;
    let result = RouteGuard::new(behavior, redirect)
        .run(&client, &mut store)
        .await?;

    let mut report = Report::default();
    let state = match result.state {
        GuardState::NoToken => "no token",
        GuardState::TokenValid { .. } => "token valid",
        GuardState::TokenInvalid => "token invalid",
    };
    report.line(format!("session: {state}")).outcome(&result.outcome);
    Ok(report)
}

/// A protected page that shows the signed-in user.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn whoami(globals: &GlobalArgs) -> Result<Report> {
    let client = globals.client()?;
    let mut store = globals.store()?;
    let result = RouteGuard::new(Behavior::Protected, SIGN_IN_PAGE)
        .run(&client, &mut store)
        .await?;

    let mut report = Report::default();
    match result.current_user() {
        Some(user) => {
            report.line(serde_json::to_string_pretty(user)?);
        }
        None if result.outcome.target().is_none() => {
            report.line("signed in");
        }
        None => {}
    }
    report.outcome(&result.outcome);
    Ok(report)
}

/// Forgets the session token and the cached user data.
///
/// # Errors
/// Returns an error if the storage file cannot be read or written.
pub fn sign_out(globals: &GlobalArgs) -> Result<Report> {
    let mut store = globals.store()?;
    store.remove_token()?;
    store.clear_user_data()?;
    debug!("signed out");

    let mut report = Report::default();
    report.line("signed out");
    Ok(report)
}
