use vault_core::validate_password;

use crate::app::AppContext;
use crate::errors::CliError;
use crate::output::{print_json, password_report};

pub fn handle_check_password(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let (password, confirm) = ctx.new_password()?;
    let validation = validate_password(&password, &confirm);

    if ui.mode.is_json() {
        let value =
            serde_json::to_value(&validation).map_err(|e| anyhow::anyhow!("JSON error: {}", e))?;
        print_json(&value)?;
    } else if !ctx.quiet() || !validation.is_valid {
        println!("{}", password_report(&ui, &validation));
    }

    if validation.is_valid {
        Ok(())
    } else {
        Err(CliError::invalid_input(format!(
            "Password does not meet the policy ({} problems)",
            validation.errors.len()
        ))
        .into())
    }
}
