//! Maps parsed command-line arguments to the action to run and the settings it runs
//! with.

use crate::cli::{
    actions::{Action, sign_in, sign_up},
    commands::{backend, pages},
    globals::GlobalArgs,
};
use crate::{config::AppConfig, flows::Behavior};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;

fn text(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn id_token(matches: &ArgMatches) -> Result<SecretString> {
    matches
        .get_one::<String>(pages::ARG_ID_TOKEN)
        .map(|token| SecretString::from(token.clone()))
        .context("missing required argument: --id-token")
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<(Action, GlobalArgs)> {
    let globals = GlobalArgs::new(AppConfig::load(backend::overrides(matches)));

    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    let action = match name {
        pages::CMD_SIGN_UP => Action::SignUp(sign_up::Args {
            email: text(sub, pages::ARG_EMAIL),
            password: SecretString::from(text(sub, pages::ARG_PASSWORD)),
            name: text(sub, pages::ARG_NAME),
            captcha_token: sub
                .get_one::<String>(pages::ARG_CAPTCHA_TOKEN)
                .map(|token| SecretString::from(token.clone())),
        }),
        pages::CMD_SIGN_UP_GOOGLE => Action::SignUpGoogle {
            id_token: id_token(sub)?,
        },
        pages::CMD_SEND_SMS => Action::SendSms {
            phone: text(sub, pages::ARG_PHONE),
        },
        pages::CMD_RESEND_SMS => Action::ResendSms {
            phone: text(sub, pages::ARG_PHONE),
        },
        pages::CMD_VERIFY_SMS => Action::VerifySms {
            code: text(sub, pages::ARG_CODE),
        },
        pages::CMD_SIGN_IN => Action::SignIn(sign_in::Args {
            email: text(sub, pages::ARG_EMAIL),
            password: SecretString::from(text(sub, pages::ARG_PASSWORD)),
        }),
        pages::CMD_SIGN_IN_GOOGLE => Action::SignInGoogle {
            id_token: id_token(sub)?,
        },
        pages::CMD_GUARD => Action::Guard {
            behavior: text(sub, pages::ARG_BEHAVIOR)
                .parse::<Behavior>()
                .map_err(|e| anyhow!(e))?,
            redirect: sub
                .get_one::<String>(pages::ARG_REDIRECT)
                .cloned()
                .context("missing required argument: --redirect")?,
        },
        pages::CMD_WHOAMI => Action::WhoAmI,
        pages::CMD_SIGN_OUT => Action::SignOut,
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok((action, globals))
}
