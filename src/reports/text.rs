//! Plain-text terminal report with aligned columns.

use super::{listed, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{Change, ChangeSet, Severity};
use crate::model::Contract;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest symbol column before names are truncated.
const MAX_SYMBOL_WIDTH: usize = 48;
const GAP: &str = "  ";

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Text reporter for terminal output
pub struct TextReporter {
    /// Use colored output
    colored: bool,
}

impl TextReporter {
    /// Create a new text reporter. Color is off when `NO_COLOR` is set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colored: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Breaking => "red",
            Severity::Addition => "green",
            Severity::Modification => "yellow",
        }
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

struct Columns {
    severity: usize,
    kind: usize,
    symbol: usize,
}

impl Columns {
    fn measure(rows: &[&Change]) -> Self {
        let mut cols = Self {
            severity: "SEVERITY".len(),
            kind: "KIND".len(),
            symbol: "SYMBOL".len(),
        };
        for change in rows {
            cols.severity = cols.severity.max(change.severity.name().width());
            cols.kind = cols.kind.max(change.kind.name().width());
            cols.symbol = cols.symbol.max(change.symbol.width().min(MAX_SYMBOL_WIDTH));
        }
        cols
    }

    fn detail_indent(&self) -> usize {
        self.severity + self.kind + 2 * GAP.len()
    }
}

impl ReportGenerator for TextReporter {
    fn generate_diff_report(
        &self,
        changes: &ChangeSet,
        old: &Contract,
        new: &Contract,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color(&config.title_for(&old.package, &new.package), "bold"));
        lines.push(String::new());

        let rows: Vec<&Change> = listed(changes, config).collect();
        if rows.is_empty() {
            lines.push("No API changes.".to_string());
        } else {
            let cols = Columns::measure(&rows);
            let header = format!(
                "{}{GAP}{}{GAP}{}{GAP}CHANGE",
                pad("SEVERITY", cols.severity),
                pad("KIND", cols.kind),
                pad("SYMBOL", cols.symbol),
            );
            let rule_width = header.width().max(
                rows.iter()
                    .map(|c| cols.detail_indent() + cols.symbol + GAP.len() + c.description.width())
                    .max()
                    .unwrap_or(0),
            );
            lines.push(self.color(&header, "bold"));
            lines.push("─".repeat(rule_width));

            let indent = " ".repeat(cols.detail_indent());
            for change in rows {
                let severity = pad(change.severity.name(), cols.severity);
                lines.push(format!(
                    "{}{GAP}{}{GAP}{}{GAP}{}",
                    self.color(&severity, Self::severity_color(change.severity)),
                    pad(change.kind.name(), cols.kind),
                    pad(&truncate(&change.symbol, MAX_SYMBOL_WIDTH), cols.symbol),
                    change.description,
                ));
                if let Some(old) = &change.old {
                    lines.push(format!("{indent}{}", self.color(&format!("- {old}"), "red")));
                }
                if let Some(new) = &change.new {
                    lines.push(format!("{indent}{}", self.color(&format!("+ {new}"), "green")));
                }
            }
        }

        let summary = changes.summary();
        lines.push(String::new());
        lines.push(format!(
            "Total: {} ({} breaking, {} additions, {} modifications)",
            summary.total, summary.breaking, summary.additions, summary.modifications
        ));
        let bump = changes.recommended_bump();
        let bump_line = match &config.current_version {
            Some(current) => format!(
                "Recommended bump: {bump} ({current} -> {})",
                bump.apply(current)
            ),
            None => format!("Recommended bump: {bump}"),
        };
        let bump_color = if changes.has_breaking() { "red" } else { "dim" };
        lines.push(self.color(&bump_line, bump_color));

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}

/// Left-align `text` in a column of `width` display cells.
fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - used))
    }
}

/// Truncate a string to fit within `max_width` display cells.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
