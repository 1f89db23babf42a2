//! UI primitives for the Vault CLI.
//!
//! - **Context**: Environment detection (TTY, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, styles
//! - **Render**: Key-value lines, receipts, hints, tables, errors
//! - **Progress**: Spinner around slow key derivation

mod context;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{badge, print_error, receipt, table, Column};

pub use progress::Spinner;
