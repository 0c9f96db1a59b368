//! Report output stage.

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};
use crate::config::DiffConfig;
use crate::diff::ChangeSet;
use crate::error::ContractError;
use crate::model::Contract;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::{Context, Result};

/// Build the report configuration for a diff run.
pub fn build_report_config(config: &DiffConfig) -> Result<ReportConfig> {
    let current_version = config
        .behavior
        .current_version
        .as_deref()
        .map(|raw| {
            let trimmed = raw.trim().trim_start_matches('v');
            semver::Version::parse(trimmed)
                .with_context(|| format!("Invalid current version: {raw}"))
        })
        .transpose()?;

    Ok(ReportConfig {
        title: None,
        breaking_only: config.output.breaking_only,
        current_version,
        metadata: ReportMetadata {
            old_path: Some(config.paths.old.to_string_lossy().to_string()),
            new_path: Some(config.paths.new.to_string_lossy().to_string()),
            ..ReportMetadata::new()
        },
    })
}

/// Render a diff report and write it to the configured destination.
pub fn output_report(
    config: &DiffConfig,
    changes: &ChangeSet,
    old: &Contract,
    new: &Contract,
) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);
    let report_config = build_report_config(config)?;

    let use_color = should_use_color(config.output.no_color) && target.is_terminal();
    let reporter = create_reporter_with_options(format, use_color).map_err(ContractError::from)?;
    tracing::debug!("Rendering {} report", reporter.format());
    let report = reporter
        .generate_diff_report(changes, old, new, &report_config)
        .map_err(ContractError::from)?;

    write_output(&report, &target, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DiffPaths};
    use crate::reports::ReportFormat;

    fn config(current_version: Option<&str>) -> DiffConfig {
        let mut app = AppConfig::default();
        app.behavior.current_version = current_version.map(str::to_string);
        DiffConfig::from_app_config(
            DiffPaths {
                old: "v1".into(),
                new: "v2".into(),
            },
            app,
        )
    }

    #[test]
    fn test_report_config_version() {
        let report = build_report_config(&config(Some("v1.2.3"))).expect("config");
        assert_eq!(report.current_version, Some(semver::Version::new(1, 2, 3)));
        assert_eq!(report.metadata.old_path.as_deref(), Some("v1"));
        assert!(!report.metadata.tool_version.is_empty());

        assert!(build_report_config(&config(Some("one.two"))).is_err());
    }

    #[test]
    fn test_output_report_writes_file() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let path = tmp.path().join("changes.json");
        let mut cfg = config(None);
        cfg.output.file = Some(path.clone());

        let contract = Contract::empty("app");
        output_report(&cfg, &ChangeSet::new(), &contract, &contract).expect("report");

        let written = std::fs::read_to_string(&path).expect("read");
        let json: serde_json::Value = serde_json::from_str(&written).expect("json");
        assert_eq!(json["summary"]["total"], 0);
        assert_eq!(cfg.output.format, ReportFormat::Auto);
    }
}
