//! Length rule - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};

use super::RuleResult;
use crate::violation::Violation;

pub const MIN_LENGTH: usize = 8;

/// Checks if the password meets the minimum length.
///
/// Length is counted in characters, not bytes.
///
/// # Returns
/// - `Some(Violation::TooShort)` if password is too short
/// - `None` if password has sufficient length
pub fn min_length_rule(password: &SecretString) -> RuleResult {
    if password.expose_secret().chars().count() < MIN_LENGTH {
        return Some(Violation::TooShort { min: MIN_LENGTH });
    }
    None
}
