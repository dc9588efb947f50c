//! Phone number normalization and SMS code parsing for the phone step.

use crate::ui::CODE_CELLS;
use regex::Regex;
use std::fmt;

/// Country prefix every number is normalized to.
pub const COUNTRY_PREFIX: &str = "+972";

/// Normalizes raw input to `+972XXXXXXXXX`. Whitespace is dropped and any of the
/// `+972`, `972` or trunk `0` prefixes is replaced by `+972`, so the function is
/// idempotent on already prefixed numbers.
#[must_use]
pub fn format_phone_number(input: &str) -> String {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let national = cleaned
        .strip_prefix(COUNTRY_PREFIX)
        .or_else(|| cleaned.strip_prefix(&COUNTRY_PREFIX[1..]))
        .or_else(|| cleaned.strip_prefix('0'))
        .unwrap_or(&cleaned);

    format!("{COUNTRY_PREFIX}{national}")
}

/// The national subscriber part of a formatted number.
#[must_use]
pub fn national_number(formatted: &str) -> &str {
    formatted.strip_prefix(COUNTRY_PREFIX).unwrap_or(formatted)
}

/// Mobile subscriber numbers: `5` followed by eight digits.
#[must_use]
pub fn is_valid_phone_number(number: &str) -> bool {
    Regex::new(r"^5[0-9]{8}$").is_ok_and(|re| re.is_match(number))
}

/// Formats and validates raw input in one step.
#[must_use]
pub fn normalize(input: &str) -> Option<String> {
    let formatted = format_phone_number(input);
    is_valid_phone_number(national_number(&formatted)).then_some(formatted)
}

/// A one-time SMS code: exactly six ASCII digits.
#[derive(Clone, PartialEq, Eq)]
pub struct SmsCode(String);

impl SmsCode {
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        (code.len() == CODE_CELLS && code.bytes().all(|b| b.is_ascii_digit()))
            .then(|| Self(code.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes are short-lived secrets; keep them out of debug output.
impl fmt::Debug for SmsCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SmsCode(******)")
    }
}
