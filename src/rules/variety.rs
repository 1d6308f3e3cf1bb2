//! Character variety rules - letter, digit and special character presence.
//!
//! "Special" here means anything outside `[A-Za-z0-9]`, which is broader
//! than the punctuation set the strength meter looks for.

use secrecy::{ExposeSecret, SecretString};

use super::RuleResult;
use crate::violation::Violation;

pub fn letter_rule(password: &SecretString) -> RuleResult {
    if password.expose_secret().chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(Violation::MissingLetter)
}

pub fn digit_rule(password: &SecretString) -> RuleResult {
    if password.expose_secret().chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(Violation::MissingDigit)
}

/// Any character that is not an ASCII letter or digit counts as special,
/// including spaces and non-ASCII characters.
pub fn special_rule(password: &SecretString) -> RuleResult {
    if password
        .expose_secret()
        .chars()
        .any(|c| !c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(Violation::MissingSpecialCharacter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_letter_rule() {
        assert_eq!(letter_rule(&secret("12345678!")), Some(Violation::MissingLetter));
        assert_eq!(letter_rule(&secret("1234567a")), None);
        assert_eq!(letter_rule(&secret("1234567Z")), None);
    }

    #[test]
    fn test_letter_rule_ignores_non_ascii_letters() {
        assert_eq!(letter_rule(&secret("ééé123!")), Some(Violation::MissingLetter));
    }

    #[test]
    fn test_digit_rule() {
        assert_eq!(digit_rule(&secret("NoNumbers!")), Some(Violation::MissingDigit));
        assert_eq!(digit_rule(&secret("One1")), None);
    }

    #[test]
    fn test_special_rule() {
        assert_eq!(
            special_rule(&secret("NoSpecial123")),
            Some(Violation::MissingSpecialCharacter)
        );
        assert_eq!(special_rule(&secret("with space")), None);
        assert_eq!(special_rule(&secret("tilde~")), None);
        assert_eq!(special_rule(&secret("accentué")), None);
    }

    #[test]
    fn test_rules_on_empty_password() {
        let pwd = secret("");
        assert!(letter_rule(&pwd).is_some());
        assert!(digit_rule(&pwd).is_some());
        assert!(special_rule(&pwd).is_some());
    }
}
