use super::codes::ErrorCode;
use std::fmt;

/// Failure of a backend call. A call fails either at the transport level, with a
/// non-success HTTP status, or with a success status whose body carries an
/// `error_code`. Callers treat a call as successful only when neither happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError<C> {
    /// The request never produced a response.
    Network(String),
    /// Non-success HTTP status, with the body's `error_code` when there was one.
    Http { status: u16, code: Option<C> },
    /// Success status, but the body carries an `error_code`.
    Rejected(C),
    /// Success status with a body that does not match the route's success shape.
    Decode(String),
}

impl<C: ErrorCode> ApiError<C> {
    /// The backend error code, from either failure channel.
    #[must_use]
    pub fn code(&self) -> Option<&C> {
        match self {
            Self::Http { code, .. } => code.as_ref(),
            Self::Rejected(code) => Some(code),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl<C: ErrorCode> fmt::Display for ApiError<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(message) => write!(formatter, "Network error: {message}"),
            Self::Http {
                status,
                code: Some(code),
            } => write!(formatter, "Request failed ({status}): {}", code.as_code()),
            Self::Http { status, code: None } => write!(formatter, "Request failed ({status})"),
            Self::Rejected(code) => write!(formatter, "Request rejected: {}", code.as_code()),
            Self::Decode(message) => write!(formatter, "Response error: {message}"),
        }
    }
}

impl<C: ErrorCode> std::error::Error for ApiError<C> {}
