//! Auth form validation
//!
//! Field-level checks for each dashboard auth form. Each `validate` runs
//! every check of the form and collects the failures per field, so the
//! caller can render all messages at once. Strength is never consulted here.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::policy::{validate_confirmation, validate_distinct_from_current, validate_password};
use crate::rules::min_length_rule;
use crate::violation::Violation;

const MIN_NAME_LENGTH: usize = 3;

/// Form fields errors can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
    Token,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::CurrentPassword => "currentPassword",
            Field::NewPassword => "newPassword",
            Field::ConfirmPassword => "confirmPassword",
            Field::Token => "token",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Name is required")]
    NameTooShort,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Current password is required.")]
    CurrentPasswordRequired,
    #[error("Please confirm your new password.")]
    ConfirmationRequired,
    #[error("Invalid or missing reset token")]
    MissingResetToken,
    #[error(transparent)]
    Password(#[from] Violation),
}

/// Failures of a form, grouped by field in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, Vec<FormError>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, error: impl Into<FormError>) {
        self.errors.entry(field).or_default().push(error.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors attached to `field`; empty if the field is fine.
    pub fn get(&self, field: Field) -> &[FormError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn messages(&self, field: Field) -> Vec<String> {
        self.get(field).iter().map(|e| e.to_string()).collect()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        {
            let fields: Vec<_> = self.fields().map(Field::as_str).collect();
            tracing::debug!("Form rejected, invalid fields: {:?}", fields);
        }

        Err(self)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, errors) in &self.errors {
            for error in errors {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, error)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// The domain must also end in a dot-separated alphabetic TLD of at least
/// two letters, so single-label hosts like `localhost` are rejected.
fn is_valid_email(email: &str) -> bool {
    if !validator::validate_email(email) {
        return false;
    }
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

fn check_email(errors: &mut FormErrors, email: &str) {
    if !is_valid_email(email) {
        errors.push(Field::Email, FormError::InvalidEmail);
    }
}

/// Runs the policy on the raw value and returns the trimmed password the
/// remaining checks and the caller work with.
fn check_new_password(errors: &mut FormErrors, field: Field, password: &SecretString) -> SecretString {
    for violation in validate_password(password).violations() {
        errors.push(field, violation);
    }
    let trimmed = password.expose_secret().trim();
    SecretString::new(trimmed.to_owned().into_boxed_str())
}

#[derive(Debug)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl SignUpForm {
    /// On success returns the trimmed password to forward to the auth provider.
    pub fn validate(&self) -> Result<SecretString, FormErrors> {
        let mut errors = FormErrors::new();
        if self.name.chars().count() < MIN_NAME_LENGTH {
            errors.push(Field::Name, FormError::NameTooShort);
        }
        check_email(&mut errors, &self.email);
        let password = check_new_password(&mut errors, Field::Password, &self.password);
        errors.into_result().map(|()| password)
    }
}

/// Login only checks the length; the class rules apply to new passwords.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        check_email(&mut errors, &self.email);
        if let Some(violation) = min_length_rule(&self.password) {
            errors.push(Field::Password, violation);
        }
        errors.into_result()
    }
}

#[derive(Debug)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        check_email(&mut errors, &self.email);
        errors.into_result()
    }
}

/// Reset via emailed link. No current password is known, so there is no
/// distinct-from-current check.
#[derive(Debug)]
pub struct ResetPasswordForm {
    pub token: Option<String>,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if self.token.as_deref().is_none_or(str::is_empty) {
            errors.push(Field::Token, FormError::MissingResetToken);
        }
        check_new_password(&mut errors, Field::Password, &self.password);
        if !validate_confirmation(&self.password, &self.confirm_password) {
            errors.push(Field::ConfirmPassword, Violation::ConfirmationMismatch);
        }
        errors.into_result()
    }
}

#[derive(Debug)]
pub struct ChangePasswordForm {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

impl ChangePasswordForm {
    /// The new password is trimmed after the policy rules run; the distinct
    /// and confirmation checks compare the trimmed value. On success returns
    /// the trimmed new password.
    pub fn validate(&self) -> Result<SecretString, FormErrors> {
        let mut errors = FormErrors::new();
        let has_current = !self.current_password.expose_secret().is_empty();

        if !has_current {
            errors.push(Field::CurrentPassword, FormError::CurrentPasswordRequired);
        }

        let new_password = check_new_password(&mut errors, Field::NewPassword, &self.new_password);
        if has_current && !validate_distinct_from_current(&self.current_password, &new_password) {
            errors.push(Field::NewPassword, Violation::SameAsCurrentPassword);
        }

        if self.confirm_password.expose_secret().is_empty() {
            errors.push(Field::ConfirmPassword, FormError::ConfirmationRequired);
        } else if !validate_confirmation(&new_password, &self.confirm_password) {
            errors.push(Field::ConfirmPassword, Violation::ConfirmationMismatch);
        }

        errors.into_result().map(|()| new_password)
    }
}
