use super::{Action, phone, report::Report, session, sign_in, sign_up};
use crate::cli::globals::GlobalArgs;
use anyhow::Result;

pub(super) async fn execute(action: Action, globals: &GlobalArgs) -> Result<Report> {
    match action {
        Action::SignUp(args) => sign_up::handle(args, globals).await,
        Action::SignUpGoogle { id_token } => sign_up::handle_google(&id_token, globals).await,
        Action::SendSms { phone: number } => phone::send(&number, globals).await,
        Action::ResendSms { phone: number } => phone::resend(&number, globals).await,
        Action::VerifySms { code } => phone::verify(&code, globals).await,
        Action::SignIn(args) => sign_in::handle(args, globals).await,
        Action::SignInGoogle { id_token } => sign_in::handle_google(&id_token, globals).await,
        Action::Guard { behavior, redirect } => {
            session::guard(behavior, &redirect, globals).await
        }
        Action::WhoAmI => session::whoami(globals).await,
        Action::SignOut => session::sign_out(globals),
    }
}
