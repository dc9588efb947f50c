//! One subcommand per page action.

use clap::{Arg, Command};

pub const CMD_SIGN_UP: &str = "sign-up";
pub const CMD_SIGN_UP_GOOGLE: &str = "sign-up-google";
pub const CMD_SEND_SMS: &str = "send-sms";
pub const CMD_RESEND_SMS: &str = "resend-sms";
pub const CMD_VERIFY_SMS: &str = "verify-sms";
pub const CMD_SIGN_IN: &str = "sign-in";
pub const CMD_SIGN_IN_GOOGLE: &str = "sign-in-google";
pub const CMD_GUARD: &str = "guard";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_SIGN_OUT: &str = "sign-out";

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NAME: &str = "name";
pub const ARG_CAPTCHA_TOKEN: &str = "captcha-token";
pub const ARG_ID_TOKEN: &str = "id-token";
pub const ARG_PHONE: &str = "phone";
pub const ARG_CODE: &str = "code";
pub const ARG_BEHAVIOR: &str = "behavior";
pub const ARG_REDIRECT: &str = "redirect";

fn text_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help).default_value("")
}

fn password_arg(help: &'static str) -> Arg {
    text_arg(ARG_PASSWORD, help)
        .env("GETLY_PASSWORD")
        .hide_env_values(true)
}

fn id_token_arg() -> Arg {
    Arg::new(ARG_ID_TOKEN)
        .long(ARG_ID_TOKEN)
        .help("Credential returned by the Google identity widget")
        .env("GETLY_ID_TOKEN")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_SIGN_UP)
            .about("Submit the sign-up form")
            .arg(text_arg(ARG_EMAIL, "Email address"))
            .arg(password_arg("Password, at least 6 characters"))
            .arg(text_arg(ARG_NAME, "First and last name"))
            .arg(
                Arg::new(ARG_CAPTCHA_TOKEN)
                    .long(ARG_CAPTCHA_TOKEN)
                    .help("reCAPTCHA response token")
                    .env("GETLY_CAPTCHA_TOKEN")
                    .hide_env_values(true),
            ),
        Command::new(CMD_SIGN_UP_GOOGLE)
            .about("Start a sign-up with a Google identity credential")
            .arg(id_token_arg()),
        Command::new(CMD_SEND_SMS)
            .about("Submit the phone form and send the verification code")
            .arg(text_arg(ARG_PHONE, "Mobile number, local or +972 form")),
        Command::new(CMD_RESEND_SMS)
            .about("Send a new verification code")
            .arg(text_arg(ARG_PHONE, "Mobile number, local or +972 form")),
        Command::new(CMD_VERIFY_SMS)
            .about("Submit the 6-digit verification code and complete the sign-up")
            .arg(text_arg(ARG_CODE, "Code received by SMS")),
        Command::new(CMD_SIGN_IN)
            .about("Submit the sign-in form")
            .arg(text_arg(ARG_EMAIL, "Email address"))
            .arg(password_arg("Password")),
        Command::new(CMD_SIGN_IN_GOOGLE)
            .about("Sign in with a Google identity credential")
            .arg(id_token_arg()),
        Command::new(CMD_GUARD)
            .about("Run the page-load guard")
            .arg(
                Arg::new(ARG_BEHAVIOR)
                    .long(ARG_BEHAVIOR)
                    .help("Page behavior")
                    .value_parser(["protected", "public"])
                    .required(true),
            )
            .arg(
                Arg::new(ARG_REDIRECT)
                    .long(ARG_REDIRECT)
                    .help("Where to send the user when the guard fails")
                    .required(true),
            ),
        Command::new(CMD_WHOAMI).about("Open a protected page and show the signed-in user"),
        Command::new(CMD_SIGN_OUT).about("Remove the stored session token and user data"),
    ]
}
