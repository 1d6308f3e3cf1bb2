//! Validation failures reported by the password policy.

use thiserror::Error;

/// A single failed password check.
///
/// `Display` renders the message shown under the offending form field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    #[error("Password must be at least {min} characters long.")]
    TooShort { min: usize },
    #[error("Password must contain at least one letter.")]
    MissingLetter,
    #[error("Password must contain at least one number.")]
    MissingDigit,
    #[error("Password must contain at least one special character.")]
    MissingSpecialCharacter,
    #[error("Passwords don't match")]
    ConfirmationMismatch,
    #[error("New password must be different from current password")]
    SameAsCurrentPassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            Violation::TooShort { min: 8 }.to_string(),
            "Password must be at least 8 characters long."
        );
        assert_eq!(
            Violation::MissingDigit.to_string(),
            "Password must contain at least one number."
        );
        assert_eq!(
            Violation::ConfirmationMismatch.to_string(),
            "Passwords don't match"
        );
    }
}
