//! Password policy library
//!
//! This library provides the password policy of an authentication
//! dashboard: pass/fail validation with itemized violations, an advisory
//! strength meter, and field checks for the auth forms.
//!
//! # Features
//!
//! - `async` (default): Enables the debounced, cancellable strength feed
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_POLICY_DEBOUNCE_MS`: Debounce of the live strength feed
//!   (default: `300`)
//!
//! # Example
//!
//! ```rust
//! use pwd_policy::{compute_strength, validate_password, StrengthLevel};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! let result = validate_password(&password);
//! assert!(result.is_valid());
//!
//! let strength = compute_strength(&password);
//! assert_eq!(strength.level, StrengthLevel::Strong);
//! ```

// Internal modules
mod config;
mod forms;
mod policy;
mod rules;
mod strength;
mod violation;

// Public API
pub use config::{
    debounce_delay, get_debounce_delay, ConfigError, DEBOUNCE_ENV_VAR, DEFAULT_DEBOUNCE,
};
pub use forms::{
    ChangePasswordForm, Field, FormError, FormErrors, ForgotPasswordForm, LoginForm,
    ResetPasswordForm, SignUpForm,
};
pub use policy::{
    validate_confirmation, validate_distinct_from_current, validate_password, RuleOutcome,
    ValidationResult,
};
pub use rules::{PolicyRule, MIN_LENGTH};
pub use strength::{
    compute_strength, requirements, Requirement, StrengthLevel, StrengthResult,
    STRENGTH_SPECIAL_CHARS,
};
pub use violation::Violation;

#[cfg(feature = "async")]
pub use strength::{compute_strength_tx, StrengthMeter};
