use super::report::Report;
use crate::{
    cli::globals::GlobalArgs,
    federated::{ButtonText, GoogleSignIn, IdentityWidget},
    flows::SignInFlow,
    ui::{Label, SignInPage},
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Args {
    pub email: String,
    pub password: SecretString,
}

/// Submits the sign-in form.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn handle(args: Args, globals: &GlobalArgs) -> Result<Report> {
    let client = globals.client()?;
    let mut store = globals.store()?;
    let mut page = SignInPage::new(&args.email, args.password.expose_secret());

    let outcome = SignInFlow::new(globals.locale())
        .submit(&mut page, &client, &mut store)
        .await?;

    let mut report = Report::default();
    report.label("error", &page.error).outcome(&outcome);
    Ok(report)
}

/// Plays the identity widget callback on the sign-in page.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn handle_google(id_token: &SecretString, globals: &GlobalArgs) -> Result<Report> {
    let mut report = Report::default();
    let widget = match IdentityWidget::initialize(
        &globals.config.google_client_id,
        ButtonText::SigninWith,
    ) {
        Ok(widget) => widget,
        Err(err) => {
            report.line(format!("error: {}", err.message(globals.locale())));
            return Ok(report);
        }
    };

    let client = globals.client()?;
    let mut store = globals.store()?;
    let mut error = Label::default();
    let outcome = {
        let mut handler = GoogleSignIn {
            flow: SignInFlow::new(globals.locale()),
            client: &client,
            store: &mut store,
            error: &mut error,
        };
        widget
            .dispatch(&mut handler, id_token.expose_secret())
            .await?
    };

    report.label("error", &error).outcome(&outcome);
    Ok(report)
}
