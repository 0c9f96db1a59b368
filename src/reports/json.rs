//! JSON report generator.

use super::{listed, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{Change, ChangeSet, ChangeSummary, VersionBump};
use crate::model::Contract;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to only include summary
    summary_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Create a summary-only reporter
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        changes: &ChangeSet,
        old: &Contract,
        new: &Contract,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let bump = changes.recommended_bump();
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "contract-tools".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                generated_at: Utc::now().to_rfc3339(),
                title: config.title_for(&old.package, &new.package),
                old: ContractInfo::new(old, config.metadata.old_path.as_deref()),
                new: ContractInfo::new(new, config.metadata.new_path.as_deref()),
            },
            summary: changes.summary(),
            version: VersionInfo {
                recommended_bump: bump,
                current: config.current_version.as_ref().map(ToString::to_string),
                next: config
                    .current_version
                    .as_ref()
                    .map(|current| bump.apply(current).to_string()),
            },
            changes: if self.summary_only {
                None
            } else {
                Some(listed(changes, config).collect())
            },
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;

        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON report structures

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata,
    summary: ChangeSummary,
    version: VersionInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<Vec<&'a Change>>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    title: String,
    old: ContractInfo,
    new: ContractInfo,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct ContractInfo {
    package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    schema_version: u32,
    symbols: usize,
    /// xxh3 of the canonical document, for matching a report to its inputs
    content_hash: String,
}

impl ContractInfo {
    fn new(contract: &Contract, source: Option<&str>) -> Self {
        Self {
            package: contract.package.clone(),
            source: source.map(str::to_string),
            schema_version: contract.schema_version,
            symbols: contract.symbol_count(),
            content_hash: format!("{:016x}", contract.content_hash()),
        }
    }
}

#[derive(Serialize)]
struct VersionInfo {
    recommended_bump: VersionBump,
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Severity;
    use crate::model::SymbolKind;
    use serde_json::Value;

    fn sample() -> ChangeSet {
        ChangeSet::from_changes(vec![
            Change::removed(SymbolKind::Method, "users", "Store.Delete", "Delete(id string) error"),
            Change::new(
                SymbolKind::Constant,
                Severity::Modification,
                "users",
                "DefaultLimit",
                "value changed",
            )
            .with_values(Some("50"), Some("100")),
        ])
    }

    fn render(reporter: &JsonReporter, config: &ReportConfig) -> Value {
        let contract = Contract::empty("users");
        let json = reporter
            .generate_diff_report(&sample(), &contract, &contract, config)
            .expect("render");
        serde_json::from_str(&json).expect("valid json")
    }

    #[test]
    fn test_report_structure() {
        let report = render(&JsonReporter::new(), &ReportConfig::default());
        assert_eq!(report["metadata"]["tool"]["name"], "contract-tools");
        assert_eq!(report["metadata"]["old"]["package"], "users");
        let hash = report["metadata"]["old"]["content_hash"].as_str().expect("hash");
        assert_eq!(hash.len(), 16);
        assert_eq!(report["metadata"]["new"]["content_hash"], hash);
        assert_eq!(report["summary"]["total"], 2);
        assert_eq!(report["summary"]["breaking"], 1);
        assert_eq!(report["version"]["recommended_bump"], "major");
        assert!(report["version"].get("next").is_none());

        let changes = report["changes"].as_array().expect("changes array");
        assert_eq!(changes[0]["kind"], "method");
        assert_eq!(changes[0]["severity"], "breaking");
        assert_eq!(changes[0]["symbol"], "Store.Delete");
        assert_eq!(changes[1]["old"], "50");
        assert_eq!(changes[1]["new"], "100");
    }

    #[test]
    fn test_next_version() {
        let config = ReportConfig {
            current_version: Some(semver::Version::new(1, 4, 2)),
            ..ReportConfig::default()
        };
        let report = render(&JsonReporter::new().pretty(false), &config);
        assert_eq!(report["version"]["current"], "1.4.2");
        assert_eq!(report["version"]["next"], "2.0.0");
    }

    #[test]
    fn test_summary_only_and_breaking_filter() {
        let report = render(&JsonReporter::summary_only(), &ReportConfig::default());
        assert!(report.get("changes").is_none());
        assert_eq!(report["summary"]["total"], 2);

        let config = ReportConfig {
            breaking_only: true,
            ..ReportConfig::default()
        };
        let report = render(&JsonReporter::new(), &config);
        assert_eq!(report["changes"].as_array().map(Vec::len), Some(1));
        assert_eq!(report["summary"]["modifications"], 1);
    }
}
