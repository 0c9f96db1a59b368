//! Markdown report generator.

use super::escape::{code_cell_opt, escape_markdown_inline, escape_markdown_table};
use super::{listed, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{Change, ChangeSet, Severity};
use crate::model::Contract;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Markdown report generator
pub struct MarkdownReporter {
    /// Include the old/new columns
    show_values: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { show_values: true }
    }

    /// Omit old/new signatures, listing only what changed
    #[must_use]
    pub const fn compact(mut self) -> Self {
        self.show_values = false;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

const SECTIONS: [(Severity, &str); 3] = [
    (Severity::Breaking, "Breaking changes"),
    (Severity::Addition, "Additions"),
    (Severity::Modification, "Modifications"),
];

impl ReportGenerator for MarkdownReporter {
    fn generate_diff_report(
        &self,
        changes: &ChangeSet,
        old: &Contract,
        new: &Contract,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        let title = config.title_for(&old.package, &new.package);
        writeln!(md, "# {}", escape_markdown_inline(&title))?;
        writeln!(md)?;

        let summary = changes.summary();
        writeln!(md, "| Severity | Count |")?;
        writeln!(md, "|----------|------:|")?;
        writeln!(md, "| Breaking | {} |", summary.breaking)?;
        writeln!(md, "| Addition | {} |", summary.additions)?;
        writeln!(md, "| Modification | {} |", summary.modifications)?;
        writeln!(md, "| **Total** | **{}** |", summary.total)?;
        writeln!(md)?;

        let bump = changes.recommended_bump();
        match &config.current_version {
            Some(current) => writeln!(
                md,
                "Recommended version bump: **{bump}** ({current} → {})",
                bump.apply(current)
            )?,
            None => writeln!(md, "Recommended version bump: **{bump}**")?,
        }

        if changes.is_empty() {
            writeln!(md)?;
            writeln!(md, "_No API changes._")?;
            return Ok(md);
        }

        let rows: Vec<&Change> = listed(changes, config).collect();
        let packages: BTreeSet<&str> = rows.iter().map(|c| c.package.as_str()).collect();
        let show_package = packages.len() > 1;

        for (severity, heading) in SECTIONS {
            if config.breaking_only && severity != Severity::Breaking {
                continue;
            }
            let section: Vec<&Change> = changes.with_severity(severity).collect();
            if section.is_empty() {
                continue;
            }
            writeln!(md)?;
            writeln!(md, "## {heading} ({})", section.len())?;
            writeln!(md)?;
            self.write_table_header(&mut md, show_package)?;
            for change in section {
                self.write_row(&mut md, change, show_package)?;
            }
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

impl MarkdownReporter {
    fn write_table_header(&self, md: &mut String, show_package: bool) -> std::fmt::Result {
        let mut header = vec!["Kind"];
        if show_package {
            header.push("Package");
        }
        header.extend(["Symbol", "Change"]);
        if self.show_values {
            header.extend(["Old", "New"]);
        }
        writeln!(md, "| {} |", header.join(" | "))?;
        writeln!(md, "|{}", "---|".repeat(header.len()))
    }

    fn write_row(&self, md: &mut String, change: &Change, show_package: bool) -> std::fmt::Result {
        let mut cells = vec![change.kind.name().to_string()];
        if show_package {
            cells.push(escape_markdown_table(&change.package));
        }
        cells.push(format!("`{}`", change.symbol.replace('|', "\\|")));
        cells.push(escape_markdown_table(&change.description));
        if self.show_values {
            cells.push(code_cell_opt(change.old.as_deref()));
            cells.push(code_cell_opt(change.new.as_deref()));
        }
        writeln!(md, "| {} |", cells.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolKind;

    fn render(reporter: &MarkdownReporter, changes: &ChangeSet, config: &ReportConfig) -> String {
        let contract = Contract::empty("github.com/acme/users");
        reporter
            .generate_diff_report(changes, &contract, &contract, config)
            .expect("render")
    }

    #[test]
    fn test_empty_report() {
        let md = render(&MarkdownReporter::new(), &ChangeSet::new(), &ReportConfig::default());
        assert!(md.starts_with("# API changes in github.com/acme/users\n"));
        assert!(md.contains("| **Total** | **0** |"));
        assert!(md.contains("Recommended version bump: **none**"));
        assert!(md.contains("_No API changes._"));
    }

    #[test]
    fn test_sections_grouped_by_severity() {
        let changes = ChangeSet::from_changes(vec![
            Change::added(SymbolKind::Function, "users", "Count", "func Count() int"),
            Change::removed(SymbolKind::Field, "users", "User.Nick", "Nick string"),
        ]);
        let config = ReportConfig {
            current_version: Some(semver::Version::new(0, 3, 1)),
            ..ReportConfig::default()
        };
        let md = render(&MarkdownReporter::new(), &changes, &config);

        let breaking = md.find("## Breaking changes (1)").expect("breaking section");
        let additions = md.find("## Additions (1)").expect("additions section");
        assert!(breaking < additions);
        assert!(!md.contains("## Modifications"));
        assert!(md.contains("(0.3.1 → 0.4.0)"));
        assert!(md.contains("| field | `User.Nick` | removed | `Nick string` | - |"));
        assert!(!md.contains("Package"));
    }

    #[test]
    fn test_breaking_only_keeps_breaking_section() {
        let changes = ChangeSet::from_changes(vec![
            Change::added(SymbolKind::Function, "users", "Count", "func Count() int"),
            Change::removed(SymbolKind::Field, "users", "User.Nick", "Nick string"),
        ]);
        let config = ReportConfig {
            breaking_only: true,
            ..ReportConfig::default()
        };
        let md = render(&MarkdownReporter::new(), &changes, &config);

        assert!(md.contains("## Breaking changes (1)"));
        assert!(!md.contains("## Additions"));
        assert!(!md.contains("`Count`"));
    }

    #[test]
    fn test_signatures_are_escaped() {
        let changes = ChangeSet::from_changes(vec![Change::new(
            SymbolKind::Field,
            Severity::Modification,
            "users",
            "User.ID",
            "tag changed",
        )
        .with_values(Some("json:\"id\""), Some("json:\"id\" db:\"a|b\""))]);
        let md = render(&MarkdownReporter::new(), &changes, &ReportConfig::default());
        assert!(md.contains("`json:\"id\" db:\"a\\|b\"`"), "{md}");
    }

    #[test]
    fn test_compact_and_package_column() {
        let changes = ChangeSet::from_changes(vec![
            Change::added(SymbolKind::Function, "users", "Count", "func Count() int"),
            Change::added(SymbolKind::Function, "users/admin", "Grant", "func Grant()"),
        ]);
        let md = render(&MarkdownReporter::new().compact(), &changes, &ReportConfig::default());
        assert!(md.contains("| Kind | Package | Symbol | Change |\n|---|---|---|---|\n"));
        assert!(md.contains("| function | users/admin | `Grant` | added |"));
    }
}
