//! Configuration module
//!
//! Reads tunables for the live strength feed from the environment.

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the strength feed debounce, in milliseconds.
pub const DEBOUNCE_ENV_VAR: &str = "PWD_POLICY_DEBOUNCE_MS";

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PWD_POLICY_DEBOUNCE_MS value: {0}")]
    InvalidDebounce(#[from] std::num::ParseIntError),
}

/// Returns the debounce delay for the live strength feed.
///
/// Priority:
/// 1. Environment variable `PWD_POLICY_DEBOUNCE_MS`
/// 2. Default of 300 ms
///
/// # Errors
///
/// Returns error if the variable is set but is not a whole number of
/// milliseconds.
pub fn get_debounce_delay() -> Result<Duration, ConfigError> {
    match std::env::var(DEBOUNCE_ENV_VAR) {
        Ok(raw) => {
            let millis: u64 = raw.trim().parse()?;
            Ok(Duration::from_millis(millis))
        }
        Err(_) => Ok(DEFAULT_DEBOUNCE),
    }
}

/// Like [`get_debounce_delay`], but falls back to the default on a bad value.
pub fn debounce_delay() -> Duration {
    match get_debounce_delay() {
        Ok(delay) => delay,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}, using default of {:?}", _e, DEFAULT_DEBOUNCE);
            DEFAULT_DEBOUNCE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::remove_var(key); }
    }

    #[test]
    #[serial]
    fn test_get_debounce_delay_default() {
        remove_env(DEBOUNCE_ENV_VAR);

        let delay = get_debounce_delay().unwrap();
        assert_eq!(delay, Duration::from_millis(300));
    }

    #[test]
    #[serial]
    fn test_get_debounce_delay_from_env() {
        set_env(DEBOUNCE_ENV_VAR, "150");

        let delay = get_debounce_delay().unwrap();
        assert_eq!(delay, Duration::from_millis(150));

        remove_env(DEBOUNCE_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_get_debounce_delay_invalid() {
        set_env(DEBOUNCE_ENV_VAR, "fast");

        let result = get_debounce_delay();
        assert!(matches!(result, Err(ConfigError::InvalidDebounce(_))));

        remove_env(DEBOUNCE_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_debounce_delay_falls_back() {
        set_env(DEBOUNCE_ENV_VAR, "-5");

        assert_eq!(debounce_delay(), DEFAULT_DEBOUNCE);

        remove_env(DEBOUNCE_ENV_VAR);
    }
}
