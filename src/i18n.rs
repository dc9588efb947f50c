//! User-facing text. Every message the flows render is a [`Message`] variant so that
//! the mapping from backend error codes to text stays a closed table.

use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Hebrew,
    English,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "he" | "he-il" | "hebrew" => Ok(Self::Hebrew),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::English),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hebrew => write!(formatter, "he"),
            Self::English => write!(formatter, "en"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    // sign-up form
    EmailRequired,
    EmailInvalid,
    PasswordRequired,
    PasswordTooShort,
    NameRequired,
    NameInvalid,
    CaptchaMissing,
    CaptchaUnavailable,
    SubmitLoading,
    SubmitSignUp,
    CaptchaFailed,
    EmailAlreadyExists,
    InternalErrorLater,
    NetworkError,

    // phone and code forms
    Sending,
    SignUpNotFound,
    SmsAlreadyVerified,
    PhoneNotMatching,
    WaitBeforeResend,
    InvalidNumber,
    SmsProviderError,
    InternalError,
    CodeResent,
    PhoneInvalid,
    CodeFormat,
    WrongCode,
    TooManyAttempts,
    CodeExpired,
    SessionExpired,
    ServerError,
    NetworkCheckConnection,

    // sign-in form
    CredentialsRequired,
    IncorrectCredentials,
    FederatedSignInFailed,
    IdentityServicesUnavailable,

    // password toggle
    ShowPassword,
    HidePassword,
}

impl Message {
    #[must_use]
    pub const fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Hebrew => self.hebrew(),
            Locale::English => self.english(),
        }
    }

    const fn hebrew(self) -> &'static str {
        match self {
            Self::EmailRequired => "אנא הזינו אימייל",
            Self::EmailInvalid => "אנא הזינו כתובת אימייל תקנית.",
            Self::PasswordRequired => "אנא הזינו סיסמה.",
            Self::PasswordTooShort => "הסיסמה חייבת להכיל לפחות 6 תווים.",
            Self::NameRequired => "אנא הזינו שם מלא",
            Self::NameInvalid => "אנא הזינו שם מלא (שם פרטי ושם משפחה).",
            Self::CaptchaMissing => "אנא אשרו שאתם לא רובוט.",
            Self::CaptchaUnavailable => "טעינת reCAPTCHA נכשלה, נסו לרענן את הדף.",
            Self::SubmitLoading => "טוען...",
            Self::SubmitSignUp => "הרשמה",
            Self::CaptchaFailed => "אימות CAPTCHA נכשל. אנא נסו שוב.",
            Self::EmailAlreadyExists => "אימייל כבר רשום במערכת.",
            Self::InternalErrorLater => "אירעה שגיאה פנימית, אנא נסו שוב מאוחר יותר.",
            Self::NetworkError => "שגיאת רשת. נסה שוב מאוחר יותר.",
            Self::Sending => "...שולח",
            Self::SignUpNotFound => "לא נמצאה הרשמה. אנא התחילו מההתחלה.",
            Self::SmsAlreadyVerified => "מספר זה כבר בשימוש",
            Self::PhoneNotMatching => "מספר טלפון לא תואם לחשבון שנרשם קודם.",
            Self::WaitBeforeResend => "יש להמתין לפני שליחת קוד נוסף.",
            Self::InvalidNumber => "מספר לא תקין או לא ניתן לשליחה.",
            Self::SmsProviderError => "שגיאה עם ספק השליחה. נסה שוב מאוחר יותר.",
            Self::InternalError => "שגיאה פנימית. נסה שוב מאוחר יותר.",
            Self::CodeResent => "קוד חדש נשלח בהצלחה!",
            Self::PhoneInvalid => "אנא הזינו מספר טלפון תקין",
            Self::CodeFormat => "הקוד חייב להכיל בדיוק 6 ספרות.",
            Self::WrongCode => "קוד שגוי. אנא נסו שוב.",
            Self::TooManyAttempts => "ניסיונות רבים מדי. אנא בקשו קוד חדש.",
            Self::CodeExpired => "הקוד פג תוקף. אנא בקשו קוד חדש.",
            Self::SessionExpired => "החיבור פג תוקף. תועברו להתחלת תהליך ההרשמה.",
            Self::ServerError => "שגיאת שרת. אנא נסו שוב מאוחר יותר.",
            Self::NetworkCheckConnection => "שגיאת רשת. אנא בדקו את החיבור ונסו שוב.",
            Self::CredentialsRequired => "אנא מלאו אימייל וסיסמה.",
            Self::IncorrectCredentials => "אימייל או סיסמה שגויים.",
            Self::FederatedSignInFailed => "הכניסה באמצעות גוגל נכשלה. אנא נסה שוב.",
            Self::IdentityServicesUnavailable => "שירותי הכניסה של גוגל לא זמינים.",
            Self::ShowPassword => "הצג סיסמה",
            Self::HidePassword => "הסתר סיסמה",
        }
    }

    const fn english(self) -> &'static str {
        match self {
            Self::EmailRequired => "Please enter an email address.",
            Self::EmailInvalid => "Please enter a valid email address.",
            Self::PasswordRequired => "Please enter a password.",
            Self::PasswordTooShort => "Password must contain at least 6 characters.",
            Self::NameRequired => "Please enter your full name.",
            Self::NameInvalid => "Please enter your full name (first and last name).",
            Self::CaptchaMissing => "Please confirm you are not a robot.",
            Self::CaptchaUnavailable => "reCAPTCHA failed to load, please refresh the page.",
            Self::SubmitLoading => "Loading...",
            Self::SubmitSignUp => "Sign up",
            Self::CaptchaFailed => "CAPTCHA verification failed. Please try again.",
            Self::EmailAlreadyExists => "This email is already registered.",
            Self::InternalErrorLater => "An internal error occurred, please try again later.",
            Self::NetworkError => "Network error. Please try again later.",
            Self::Sending => "Sending...",
            Self::SignUpNotFound => "No sign-up was found. Please start over.",
            Self::SmsAlreadyVerified => "This number is already in use.",
            Self::PhoneNotMatching => "The phone number does not match the one registered earlier.",
            Self::WaitBeforeResend => "Please wait before requesting another code.",
            Self::InvalidNumber => "The number is invalid or cannot receive messages.",
            Self::SmsProviderError => "SMS provider error. Please try again later.",
            Self::InternalError => "Internal error. Please try again later.",
            Self::CodeResent => "A new code was sent successfully!",
            Self::PhoneInvalid => "Please enter a valid phone number.",
            Self::CodeFormat => "The code must contain exactly 6 digits.",
            Self::WrongCode => "Wrong code. Please try again.",
            Self::TooManyAttempts => "Too many attempts. Please request a new code.",
            Self::CodeExpired => "The code has expired. Please request a new code.",
            Self::SessionExpired => {
                "Your session has expired. You will be taken back to the start of sign-up."
            }
            Self::ServerError => "Server error. Please try again later.",
            Self::NetworkCheckConnection => {
                "Network error. Please check your connection and try again."
            }
            Self::CredentialsRequired => "Please fill in both email and password.",
            Self::IncorrectCredentials => "Email or password are incorrect.",
            Self::FederatedSignInFailed => "Google sign-in failed.",
            Self::IdentityServicesUnavailable => "Google sign-in services are unavailable.",
            Self::ShowPassword => "Show password",
            Self::HidePassword => "Hide password",
        }
    }
}

/// Message for a backend code the client does not recognise. The raw code is kept.
#[must_use]
pub fn unknown_error(locale: Locale, code: &str) -> String {
    match locale {
        Locale::Hebrew => format!("שגיאה לא מוכרת: {code}"),
        Locale::English => format!("Unknown error: {code}"),
    }
}

/// Message for a failed sign-up completion, built from the raw code with underscores
/// turned into spaces.
#[must_use]
pub fn sign_up_failed(locale: Locale, code: &str) -> String {
    let readable = code.replace('_', " ");
    match locale {
        Locale::Hebrew => format!("ההרשמה נכשלה: {readable}"),
        Locale::English => format!("Sign-up failed: {readable}"),
    }
}
