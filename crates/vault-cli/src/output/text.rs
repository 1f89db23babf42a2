//! Text output for the password policy check.

use vault_core::password::{PasswordRule, PasswordValidation};

use crate::ui::{badge, table, Badge, Column, UiContext};

/// Render a policy result: every rule with pass/fail in pretty mode, one
/// `error=` line per failure in plain mode.
pub fn password_report(ctx: &UiContext, validation: &PasswordValidation) -> String {
    if ctx.mode.is_pretty() {
        let failed = validation.failed_rules();
        let rows: Vec<Vec<String>> = PasswordRule::ALL
            .iter()
            .map(|rule| {
                let status = if failed.contains(rule) {
                    badge(ctx, Badge::Err, "")
                } else {
                    badge(ctx, Badge::Ok, "")
                };
                vec![status, rule.message().to_string()]
            })
            .collect();
        let summary = if validation.is_valid {
            badge(ctx, Badge::Ok, "Password meets the policy")
        } else {
            badge(ctx, Badge::Warn, "Password does not meet the policy")
        };
        format!(
            "{}\n{}",
            summary,
            table(ctx, &[Column::new(""), Column::new("Rule")], &rows)
        )
    } else {
        let mut lines = vec![format!("valid={}", validation.is_valid)];
        lines.extend(validation.errors.iter().map(|e| format!("error={}", e)));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use vault_core::validate_password;

    #[test]
    fn test_plain_lists_every_error() {
        let ctx = UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            mode: OutputMode::Plain,
        };
        let out = password_report(&ctx, &validate_password("a", "b"));
        assert!(out.starts_with("valid=false"));
        assert!(out.contains("error=Passwords do not match"));
        assert!(out.contains("error=Password must be at least 12 characters long"));
    }

    #[test]
    fn test_pretty_shows_all_rules() {
        let ctx = UiContext {
            is_tty: true,
            color: false,
            unicode: false,
            mode: OutputMode::Pretty,
        };
        let out = password_report(&ctx, &validate_password("ValidPassword123!", "ValidPassword123!"));
        assert!(out.contains("[OK] Password meets the policy"));
        for rule in PasswordRule::ALL {
            assert!(out.contains(rule.message()));
        }
    }
}
