//! Spinner shown while the master password is stretched.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;

/// A spinner on stderr for indeterminate work. Silent unless animations are allowed.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn new(ctx: &UiContext, message: &str) -> Self {
        if !ctx.allows_animation() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        let (template, frames): (&str, &[&str]) = if ctx.unicode {
            (
                "{spinner:.cyan} {msg}...",
                &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""],
            )
        } else {
            ("{spinner} {msg}...", &["|", "/", "-", "\\", ""])
        };
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            bar.set_style(style.tick_strings(frames));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    /// Run `work` with the spinner active, clearing it afterwards.
    pub fn run<T>(ctx: &UiContext, message: &str, work: impl FnOnce() -> T) -> T {
        let spinner = Self::new(ctx, message);
        let result = work();
        spinner.finish();
        result
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    #[test]
    fn test_run_returns_result_without_tty() {
        let ctx = UiContext {
            is_tty: false,
            color: false,
            unicode: true,
            mode: OutputMode::Plain,
        };
        assert_eq!(Spinner::run(&ctx, "Deriving key", || 41 + 1), 42);
    }
}
