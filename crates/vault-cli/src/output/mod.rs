//! Output formatting for command results.
//!
//! Every command builds a [`Report`]; this module renders it as JSON, a
//! pretty receipt, or plain `key=value` lines depending on the mode.

mod json;
mod text;

pub use json::{print_json, verification_json};
pub use text::password_report;

use crate::ui::{receipt, UiContext};

/// A command result ready for rendering.
pub struct Report {
    title: String,
    items: Vec<(String, String)>,
    primary: Option<String>,
    json: serde_json::Value,
}

impl Report {
    pub fn new(title: impl Into<String>, json: serde_json::Value) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            primary: None,
            json,
        }
    }

    pub fn item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.push((key.into(), value.into()));
        self
    }

    /// The one value printed in `--quiet` mode.
    pub fn primary(mut self, value: impl Into<String>) -> Self {
        self.primary = Some(value.into());
        self
    }

    pub fn emit(&self, ctx: &UiContext, quiet: bool) -> anyhow::Result<()> {
        if ctx.mode.is_json() {
            return print_json(&self.json);
        }
        if quiet {
            if let Some(primary) = &self.primary {
                println!("{}", primary);
            }
            return Ok(());
        }
        let items: Vec<(&str, &str)> = self
            .items
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        println!("{}", receipt(ctx, &self.title, &items));
        Ok(())
    }
}
