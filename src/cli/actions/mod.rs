pub mod phone;
pub mod report;
pub mod session;
pub mod sign_in;
pub mod sign_up;

// Internal "interpreter" for `Action`.
mod run;

use crate::{cli::globals::GlobalArgs, flows::Behavior};
use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    SignUp(sign_up::Args),
    SignUpGoogle { id_token: SecretString },
    SendSms { phone: String },
    ResendSms { phone: String },
    VerifySms { code: String },
    SignIn(sign_in::Args),
    SignInGoogle { id_token: SecretString },
    Guard { behavior: Behavior, redirect: String },
    WhoAmI,
    SignOut,
}

impl Action {
    /// Execute the action and print the resulting page state.
    /// # Errors
    /// Returns an error if the storage file or the HTTP client cannot be set up.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        let report = run::execute(self, globals).await?;
        report.print();
        Ok(())
    }
}
