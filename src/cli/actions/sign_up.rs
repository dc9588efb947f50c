use super::report::Report;
use crate::{
    cli::globals::GlobalArgs,
    federated::{ButtonText, GoogleSignUp, IdentityWidget},
    flows::{Captcha, CaptchaError, GoogleSignUpFlow, SignUpFlow},
    ui::{Field, Label, SignUpPage},
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

pub struct Args {
    pub email: String,
    pub password: SecretString,
    pub name: String,
    pub captcha_token: Option<SecretString>,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .field("captcha_token", &self.captcha_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// CAPTCHA answered ahead of time: the token comes from the command line.
#[derive(Debug, Default)]
pub struct StaticCaptcha {
    token: Option<SecretString>,
}

impl StaticCaptcha {
    #[must_use]
    pub fn new(token: Option<SecretString>) -> Self {
        Self { token }
    }
}

impl Captcha for StaticCaptcha {
    fn response(&self) -> Result<SecretString, CaptchaError> {
        Ok(self
            .token
            .as_ref()
            .map(|token| SecretString::from(token.expose_secret().to_string()))
            .unwrap_or_else(|| SecretString::from("")))
    }

    // A token is single-use; the next attempt needs a fresh one.
    fn reset(&mut self) {
        self.token = None;
    }
}

/// Submits the sign-up form.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn handle(args: Args, globals: &GlobalArgs) -> Result<Report> {
    let client = globals.client()?;
    let mut store = globals.store()?;
    let mut page = SignUpPage::new(&args.email, args.password.expose_secret(), &args.name);
    let mut captcha = StaticCaptcha::new(args.captcha_token);

    let outcome = SignUpFlow::new(globals.locale())
        .submit(&mut page, &mut captcha, &client, &mut store)
        .await?;

    let mut report = Report::default();
    for field in Field::ALL {
        if let Some(message) = page.errors.message(field) {
            report.line(format!("{}: {message}", field.id()));
        }
    }
    report.label("error", &page.server_error).outcome(&outcome);
    Ok(report)
}

/// Plays the identity widget callback on the sign-up page.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn handle_google(id_token: &SecretString, globals: &GlobalArgs) -> Result<Report> {
    let mut report = Report::default();
    let widget = match IdentityWidget::initialize(
        &globals.config.google_client_id,
        ButtonText::SignupWith,
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
        let mut handler = GoogleSignUp {
            flow: GoogleSignUpFlow::new(globals.locale()),
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
