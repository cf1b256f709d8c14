//! Output formatting for the CLI.
//!
//! - **context**: TTY and color detection, output mode resolution
//! - **render**: badges, notices, record tables and detail views
//! - **json**: machine-readable output

mod context;
pub mod json;
pub mod render;

pub use context::UiContext;
pub use json::{print_json, record_json, records_json};
pub use render::{badge, kv, print_error, print_notices, record_detail, records_table, Badge};
