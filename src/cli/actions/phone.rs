use super::report::Report;
use crate::{
    cli::globals::GlobalArgs,
    flows::{Outcome, PhoneFlow},
    ui::PhonePage,
};
use anyhow::Result;
use tracing::debug;

fn page_report(page: &PhonePage, outcome: &Outcome) -> Report {
    let mut report = Report::default();
    if let Some(alert) = &page.alert {
        report.line(format!("alert: {alert}"));
    }
    report
        .label("phone", &page.phone_error)
        .label("resend", &page.resend_error)
        .label("code", &page.code_error)
        .label("success", &page.success);
    if page.code_form_visible && outcome.target().is_none() {
        report.line("enter the 6-digit code sent by SMS");
    }
    report.outcome(outcome);
    report
}

/// Submits the phone form.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn send(phone: &str, globals: &GlobalArgs) -> Result<Report> {
    let client = globals.client()?;
    let mut store = globals.store()?;
    let mut page = PhonePage::with_phone(phone);
    let mut flow = PhoneFlow::new(globals.locale());

    let outcome = flow.submit_phone(&mut page, &client, &mut store).await?;
    Ok(page_report(&page, &outcome))
}

/// Clicks the resend button for a number entered earlier.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn resend(phone: &str, globals: &GlobalArgs) -> Result<Report> {
    let client = globals.client()?;
    let mut store = globals.store()?;
    let mut page = PhonePage {
        phone_form_visible: false,
        code_form_visible: true,
        ..PhonePage::default()
    };
    let mut flow = PhoneFlow::new(globals.locale());
    if !flow.remember_phone(phone) {
        debug!("resend without a valid phone number");
    }

    let outcome = flow.resend(&mut page, &client, &mut store).await?;
    Ok(page_report(&page, &outcome))
}

/// Submits the code form.
///
/// # Errors
/// Returns an error if the storage file or the HTTP client cannot be set up.
pub async fn verify(code: &str, globals: &GlobalArgs) -> Result<Report> {
    let client = globals.client()?;
    let mut store = globals.store()?;
    let mut page = PhonePage::with_code(code);

    let outcome = PhoneFlow::new(globals.locale())
        .submit_code(&mut page, &client, &mut store)
        .await?;
    Ok(page_report(&page, &outcome))
}
