//! One-time passcode input utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in a one-time passcode
pub const OTP_LENGTH: usize = 6;

static OTP_DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{6}$").unwrap()
});

/// Strip every non-digit character and keep the first 6 digits
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(OTP_LENGTH)
        .collect()
}

/// Check whether a normalized code has exactly 6 digits
pub fn is_valid(digits: &str) -> bool {
    OTP_DIGITS_REGEX.is_match(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_never_exceeds_six_digits() {
        let inputs = [
            "",
            "12",
            "123456",
            "1234567890",
            "12-34-56-78",
            "a1b2c3d4e5f6g7",
            "  654 321  ",
        ];
        for input in inputs {
            let digits = normalize(input);
            assert!(digits.len() <= OTP_LENGTH, "input {input:?}");
            assert!(digits.chars().all(|c| c.is_ascii_digit()), "input {input:?}");
        }
    }

    #[test]
    fn test_normalize_keeps_leading_digits() {
        assert_eq!(normalize("12-34-56-78"), "123456");
        assert_eq!(normalize(" 654 321 "), "654321");
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("654321"));
        assert!(is_valid("000000"));
        assert!(!is_valid("65432"));
        assert!(!is_valid("6543210"));
        assert!(!is_valid("65432a"));
    }
}
