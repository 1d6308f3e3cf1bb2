//! Password policy evaluator - pass/fail validation of new passwords.

use secrecy::{ExposeSecret, SecretString};

use crate::rules::PolicyRule;
use crate::violation::Violation;

/// Outcome of a single policy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: PolicyRule,
    pub passed: bool,
}

/// Per-rule outcome of [`validate_password`], in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    outcomes: [RuleOutcome; 4],
}

impl ValidationResult {
    /// `true` when every rule passed.
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    pub fn passed(&self, rule: PolicyRule) -> bool {
        self.outcomes
            .iter()
            .find(|o| o.rule == rule)
            .is_some_and(|o| o.passed)
    }

    /// Violations of the failed rules, in rule order.
    pub fn violations(&self) -> impl Iterator<Item = Violation> + '_ {
        self.outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| o.rule.violation())
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations().map(|v| v.to_string()).collect()
    }
}

/// Validates a candidate password against the policy rules.
///
/// Every rule is evaluated, so all failures are reported together.
/// Never fails: an empty password simply fails every rule.
pub fn validate_password(password: &SecretString) -> ValidationResult {
    let outcomes = PolicyRule::ALL.map(|rule| RuleOutcome {
        rule,
        passed: rule.check(password).is_none(),
    });
    let result = ValidationResult { outcomes };

    #[cfg(feature = "tracing")]
    {
        if !result.is_valid() {
            let failed: Vec<_> = result
                .outcomes
                .iter()
                .filter(|o| !o.passed)
                .map(|o| o.rule.name())
                .collect();
            tracing::debug!("Password rejected by policy rules: {:?}", failed);
        }
    }

    result
}

/// Passes iff the confirmation equals the new password exactly.
pub fn validate_confirmation(new_password: &SecretString, confirm_password: &SecretString) -> bool {
    new_password.expose_secret() == confirm_password.expose_secret()
}

/// Passes iff the new password differs from the current one.
///
/// Only meaningful for the change-password flow.
pub fn validate_distinct_from_current(
    current_password: &SecretString,
    new_password: &SecretString,
) -> bool {
    current_password.expose_secret() != new_password.expose_secret()
}
