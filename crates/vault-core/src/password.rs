//! Master password policy.
//!
//! Every rule is checked independently so a form can show all failures at
//! once. Messages come back in a fixed order: length, symbol, uppercase,
//! lowercase, number, match.

use serde::{Deserialize, Serialize};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Characters that satisfy the symbol rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A single policy rule, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    Length,
    Symbol,
    Uppercase,
    Lowercase,
    Number,
    Match,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 6] = [
        PasswordRule::Length,
        PasswordRule::Symbol,
        PasswordRule::Uppercase,
        PasswordRule::Lowercase,
        PasswordRule::Number,
        PasswordRule::Match,
    ];

    /// User-facing message shown when the rule fails.
    pub fn message(&self) -> &'static str {
        match self {
            PasswordRule::Length => "Password must be at least 12 characters long",
            PasswordRule::Symbol => "Password must contain at least one special character",
            PasswordRule::Uppercase => "Password must contain at least one uppercase letter",
            PasswordRule::Lowercase => "Password must contain at least one lowercase letter",
            PasswordRule::Number => "Password must contain at least one number",
            PasswordRule::Match => "Passwords do not match",
        }
    }

    fn passes(&self, password: &str, confirm: &str) -> bool {
        match self {
            PasswordRule::Length => password.chars().count() >= MIN_PASSWORD_LENGTH,
            PasswordRule::Symbol => password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
            PasswordRule::Uppercase => password.chars().any(char::is_uppercase),
            PasswordRule::Lowercase => password.chars().any(char::is_lowercase),
            PasswordRule::Number => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::Match => password == confirm,
        }
    }
}

/// Outcome of a policy check. A weak password is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    #[serde(skip)]
    failed: Vec<PasswordRule>,
}

impl PasswordValidation {
    /// Rules that failed, in reporting order.
    pub fn failed_rules(&self) -> &[PasswordRule] {
        &self.failed
    }
}

/// Check `password` and its confirmation against every rule.
///
/// # Examples
///
/// ```
/// use vault_core::password::validate_password;
///
/// let result = validate_password("ValidPassword123!", "ValidPassword123!");
/// assert!(result.is_valid);
/// assert!(result.errors.is_empty());
/// ```
pub fn validate_password(password: &str, confirm_password: &str) -> PasswordValidation {
    let failed: Vec<PasswordRule> = PasswordRule::ALL
        .iter()
        .copied()
        .filter(|rule| !rule.passes(password, confirm_password))
        .collect();

    PasswordValidation {
        is_valid: failed.is_empty(),
        errors: failed.iter().map(|rule| rule.message().to_string()).collect(),
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        let result = validate_password("ValidPassword123!", "ValidPassword123!");
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_short_password_reports_length_not_match() {
        let result = validate_password("short", "short");
        assert!(!result.is_valid);
        assert!(result
            .errors
            .contains(&PasswordRule::Length.message().to_string()));
        assert!(!result
            .errors
            .contains(&PasswordRule::Match.message().to_string()));
    }

    #[test]
    fn test_mismatch_reported_alongside_others() {
        let result = validate_password("a", "b");
        assert!(result.errors.len() >= 2);
        assert_eq!(result.errors.last().unwrap(), "Passwords do not match");
    }

    #[test]
    fn test_errors_in_fixed_order() {
        // Fails everything: too short, no symbol, no uppercase, no lowercase, no digit, mismatch
        let result = validate_password("", "x");
        assert_eq!(result.failed_rules(), &PasswordRule::ALL);
        let expected: Vec<String> = PasswordRule::ALL
            .iter()
            .map(|rule| rule.message().to_string())
            .collect();
        assert_eq!(result.errors, expected);
    }

    #[test]
    fn test_each_rule_independently() {
        let cases = [
            ("Short1!a", PasswordRule::Length),
            ("NoSymbolHere123", PasswordRule::Symbol),
            ("no-upper-case-123!", PasswordRule::Uppercase),
            ("NO-LOWER-CASE-123!", PasswordRule::Lowercase),
            ("No-Digits-At-All!", PasswordRule::Number),
        ];
        for (password, rule) in cases {
            let result = validate_password(password, password);
            assert_eq!(result.failed_rules(), &[rule], "password {:?}", password);
        }
    }

    #[test]
    fn test_every_special_character_counts() {
        for symbol in SPECIAL_CHARACTERS.chars() {
            let password = format!("Abcdefghijk1{}", symbol);
            assert!(validate_password(&password, &password).is_valid, "{}", symbol);
        }
        // Hyphen and underscore are not in the set
        assert!(!validate_password("Abcdefghijk1-_", "Abcdefghijk1-_").is_valid);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 11 characters, more than 12 bytes
        let password = "Ééééééé1!aB";
        assert_eq!(password.chars().count(), 11);
        let result = validate_password(password, password);
        assert_eq!(result.failed_rules(), &[PasswordRule::Length]);
    }

    #[test]
    fn test_json_shape() {
        let result = validate_password("short", "short");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isValid"], serde_json::json!(false));
        assert!(value["errors"].is_array());
    }
}
