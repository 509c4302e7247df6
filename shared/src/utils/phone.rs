//! Phone number utilities
//!
//! Numbers are handled as bare 10-digit national numbers. Raw input is
//! normalized as the user types: every non-digit is dropped and anything past
//! the tenth digit is silently discarded.

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in a national mobile number
pub const PHONE_LENGTH: usize = 10;

/// Country code shown in front of the national number
pub const COUNTRY_CODE: &str = "+91";

static PHONE_DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{10}$").unwrap()
});

/// Strip every non-digit character and keep the first 10 digits
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_LENGTH)
        .collect()
}

/// Check whether a normalized number has exactly 10 digits
pub fn is_valid(digits: &str) -> bool {
    PHONE_DIGITS_REGEX.is_match(digits)
}

/// Group digits for display as `XXXXX XXX XX`
///
/// Grouping only starts once more than five digits are present, so partial
/// input renders naturally while typing. Non-digits in `digits` are ignored.
///
/// ```
/// use rv_shared::phone::format;
///
/// assert_eq!(format("98765"), "98765");
/// assert_eq!(format("9876543"), "98765 43");
/// assert_eq!(format("9876543210"), "98765 432 10");
/// ```
pub fn format(digits: &str) -> String {
    let cleaned = normalize(digits);
    match cleaned.len() {
        0..=5 => cleaned,
        6..=8 => format!("{} {}", &cleaned[..5], &cleaned[5..]),
        _ => format!("{} {} {}", &cleaned[..5], &cleaned[5..8], &cleaned[8..]),
    }
}

/// Format a number with the country code prefix, e.g. `+91 98765 432 10`
pub fn display_with_country_code(digits: &str) -> String {
    format!("{} {}", COUNTRY_CODE, format(digits))
}

/// Mask a phone number for logs (e.g., 98****3210)
pub fn mask(phone: &str) -> String {
    let digits = normalize(phone);
    if digits.len() >= 7 {
        format!("{}****{}", &digits[..2], &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}
