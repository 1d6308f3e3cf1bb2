//! Password policy rules
//!
//! Each rule checks one structural requirement a new password must meet.

mod length;
mod variety;

use secrecy::SecretString;

use crate::violation::Violation;

pub use length::{MIN_LENGTH, min_length_rule};
pub use variety::{digit_rule, letter_rule, special_rule};

/// Result type for rule functions.
/// - `Some(violation)` - Rule failed
/// - `None` - Rule passed
pub type RuleResult = Option<Violation>;

/// The fixed policy rule set, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyRule {
    MinLength,
    HasLetter,
    HasDigit,
    HasSpecial,
}

impl PolicyRule {
    /// All rules in the order their violations are reported.
    pub const ALL: [PolicyRule; 4] = [
        PolicyRule::MinLength,
        PolicyRule::HasLetter,
        PolicyRule::HasDigit,
        PolicyRule::HasSpecial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PolicyRule::MinLength => "min_length",
            PolicyRule::HasLetter => "has_letter",
            PolicyRule::HasDigit => "has_digit",
            PolicyRule::HasSpecial => "has_special",
        }
    }

    /// The violation reported when this rule fails.
    pub fn violation(self) -> Violation {
        match self {
            PolicyRule::MinLength => Violation::TooShort { min: MIN_LENGTH },
            PolicyRule::HasLetter => Violation::MissingLetter,
            PolicyRule::HasDigit => Violation::MissingDigit,
            PolicyRule::HasSpecial => Violation::MissingSpecialCharacter,
        }
    }

    pub fn check(self, password: &SecretString) -> RuleResult {
        let rule_fn: fn(&SecretString) -> RuleResult = match self {
            PolicyRule::MinLength => min_length_rule,
            PolicyRule::HasLetter => letter_rule,
            PolicyRule::HasDigit => digit_rule,
            PolicyRule::HasSpecial => special_rule,
        };
        rule_fn(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = PolicyRule::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["min_length", "has_letter", "has_digit", "has_special"]);
    }

    #[test]
    fn test_check_reports_own_violation() {
        let pwd = SecretString::new("".to_string().into());
        for rule in PolicyRule::ALL {
            assert_eq!(rule.check(&pwd), Some(rule.violation()));
        }
    }
}
