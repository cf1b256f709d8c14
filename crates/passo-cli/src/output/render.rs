//! Rendering primitives for CLI output.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use passo_core::notify::{Notice, NoticeKind};
use passo_core::{CredentialRecord, Theme};

use super::context::UiContext;
use crate::constants::{SECRET_MASK, SHORT_ID_LEN};

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Err,
    Info,
}

impl Badge {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Err => "[ERR]",
            Self::Info => "[INFO]",
        }
    }

    fn paint(&self, color: bool) -> String {
        if !color {
            return self.text().to_string();
        }
        match self {
            Self::Ok => self.text().green().bold().to_string(),
            Self::Err => self.text().red().bold().to_string(),
            Self::Info => self.text().cyan().bold().to_string(),
        }
    }
}

impl From<NoticeKind> for Badge {
    fn from(kind: NoticeKind) -> Self {
        match kind {
            NoticeKind::Success => Badge::Ok,
            NoticeKind::Error => Badge::Err,
            NoticeKind::Info => Badge::Info,
        }
    }
}

/// Render a badge with optional message.
pub fn badge(color: bool, kind: Badge, message: &str) -> String {
    let painted = kind.paint(color);
    if message.is_empty() {
        painted
    } else {
        format!("{} {}", painted, message)
    }
}

/// Print queued notices to stderr.
///
/// Quiet mode drops success notices; errors and info always show.
pub fn print_notices(ctx: &UiContext, notices: Vec<Notice>) {
    for notice in notices {
        if ctx.quiet && notice.kind == NoticeKind::Success {
            continue;
        }
        eprintln!(
            "{}",
            badge(ctx.color_stderr, notice.kind.into(), &notice.message)
        );
    }
}

/// Print an error (and optional hint) to stderr.
pub fn print_error(ctx: &UiContext, message: &str, hint: Option<&str>) {
    eprintln!("{}", badge(ctx.color_stderr, Badge::Err, message));
    if let Some(hint) = hint {
        let label = if ctx.color_stderr {
            "Hint:".dimmed().to_string()
        } else {
            "Hint:".to_string()
        };
        eprintln!("{} {}", label, hint);
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with a styled key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = format!("{}:", key);
        let label = match (ctx.color, ctx.theme) {
            (false, _) => label,
            (true, Theme::Light) => label.dimmed().to_string(),
            (true, Theme::Dark) => label.bright_blue().to_string(),
        };
        format!("{} {}", label, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// First characters of an ID, for tables.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Render a list of records.
///
/// Pretty mode: borderless table with a header row
/// Plain mode: one tab-separated line per record (full ID, no header)
pub fn records_table(ctx: &UiContext, records: &[&CredentialRecord]) -> String {
    if ctx.mode.is_pretty() {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let header: Vec<Cell> = ["ID", "WEBSITE", "LOGIN", "UPDATED"]
            .into_iter()
            .map(|title| {
                let cell = Cell::new(title);
                if ctx.color {
                    cell.add_attribute(Attribute::Dim)
                } else {
                    cell
                }
            })
            .collect();
        table.set_header(header);
        for i in 0..4 {
            if let Some(column) = table.column_mut(i) {
                column.set_padding((0, 2));
            }
        }

        for record in records {
            table.add_row(vec![
                short_id(&record.id).to_string(),
                record.website.clone(),
                record.login.clone(),
                record.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }
        table.to_string()
    } else {
        records
            .iter()
            .map(|record| {
                format!(
                    "{}\t{}\t{}\t{}",
                    record.id,
                    record.website,
                    record.login,
                    record.updated_at.to_rfc3339()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render one record as key-value lines.
pub fn record_detail(ctx: &UiContext, record: &CredentialRecord, reveal: bool) -> String {
    let secret = if reveal {
        record.secret.as_str()
    } else {
        SECRET_MASK
    };
    let mut lines = vec![
        kv(ctx, "ID", &record.id),
        kv(ctx, "Website", &record.website),
        kv(ctx, "Login", &record.login),
        kv(ctx, "Secret", secret),
        kv(ctx, "Created", &record.created_at.to_rfc3339()),
        kv(ctx, "Updated", &record.updated_at.to_rfc3339()),
    ];
    if let Some(owner) = &record.owner_id {
        lines.push(kv(ctx, "Owner", owner));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::context::OutputMode;
    use chrono::Utc;
    use passo_core::NewCredential;

    fn plain() -> UiContext {
        UiContext {
            mode: OutputMode::Plain,
            color: false,
            color_stderr: false,
            quiet: false,
            theme: Theme::Light,
        }
    }

    fn record() -> CredentialRecord {
        NewCredential::new("example.com", "a1", "Tr0ub4dor&3").into_record(
            "0123456789abcdef".to_string(),
            Utc::now(),
            None,
        )
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_badge_without_color() {
        assert_eq!(badge(false, Badge::Ok, "done"), "[OK] done");
        assert_eq!(badge(false, Badge::Err, ""), "[ERR]");
    }

    #[test]
    fn test_plain_table_has_full_ids_and_no_secret() {
        let record = record();
        let out = records_table(&plain(), &[&record]);
        assert!(out.starts_with("0123456789abcdef\texample.com\ta1\t"));
        assert!(!out.contains("Tr0ub4dor"));
    }

    #[test]
    fn test_detail_masks_secret_unless_revealed() {
        let record = record();
        let masked = record_detail(&plain(), &record, false);
        assert!(masked.contains("secret=********"));
        assert!(!masked.contains("Tr0ub4dor"));

        let revealed = record_detail(&plain(), &record, true);
        assert!(revealed.contains("secret=Tr0ub4dor&3"));
    }
}
