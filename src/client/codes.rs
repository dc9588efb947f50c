//! Closed sets of the `error_code` strings each backend route can return. Every set
//! has an `Unknown` arm that keeps the raw code for display.

use std::fmt;

/// An application-level error code carried in a response body.
pub trait ErrorCode: fmt::Debug + Sized {
    fn from_code(code: &str) -> Self;
    fn as_code(&self) -> &str;
}

macro_rules! error_codes {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $code:literal $(| $alias:literal)*,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
            Unknown(String),
        }

        impl ErrorCode for $name {
            fn from_code(code: &str) -> Self {
                match code {
                    $($code $(| $alias)* => Self::$variant,)+
                    other => Self::Unknown(other.to_string()),
                }
            }

            fn as_code(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => code,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_code())
            }
        }
    };
}

error_codes! {
    /// `/auth/sign-up/start`
    pub enum StartErrorCode {
        CaptchaVerificationFailed => "captcha_verification_failed",
        EmailAlreadyExists => "email_already_exists",
        InvalidToken => "invalid_token",
        InternalError => "internal_error" | "InternalError",
    }
}

error_codes! {
    /// `/auth/sign-up/send-sms`
    pub enum SendSmsErrorCode {
        SessionNotFound => "session_not_found",
        SmsAlreadyVerified => "sms_already_verified",
        PhoneNumNotMatching => "phone_num_not_matching",
        NeedToWaitBeforeResend => "need_to_wait_before_resend",
        InvalidNumber => "invalid_number",
        ApiError => "api_error" | "a_p_i_error",
        InternalError => "InternalError" | "internal_error",
    }
}

error_codes! {
    /// `/auth/sign-up/verify-sms`
    pub enum VerifySmsErrorCode {
        WrongCode => "wrong_code",
        TooManyAttempts => "too_many_attempts",
        NeedToResendCode => "need_to_resend_code",
        SessionNotFound => "session_not_found",
        InternalError => "InternalError" | "internal_error",
    }
}

error_codes! {
    /// `/auth/sign-up/complete`
    pub enum CompleteErrorCode {
        SessionNotFound => "session_not_found",
        EmailNotVerified => "email_not_verified",
        CodeNotVerified => "code_not_verified",
        InternalError => "internal_error" | "InternalError",
    }
}

error_codes! {
    /// `/auth/sign-in` and `/auth/me`
    pub enum SignInErrorCode {
        InvalidCredentials => "invalid_credentials",
        TokenExpired => "token_expired",
        NeedToVerifyEmail => "need_to_verify_email",
        InternalError => "internal_error" | "InternalError",
    }
}
