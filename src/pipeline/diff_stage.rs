//! Diff computation stage.

use crate::config::DiffConfig;
use crate::diff::{ChangeSet, DiffEngine};
use crate::model::Contract;
use anyhow::{Context, Result};

/// Run the semantic diff between two loaded contracts.
pub fn compute_diff(config: &DiffConfig, old: &Contract, new: &Contract) -> Result<ChangeSet> {
    let quiet = config.behavior.quiet;
    if !quiet {
        tracing::info!("Computing API diff...");
    }

    let changes = DiffEngine::new(config.diff)
        .diff(old, new)
        .context("Failed to compute diff")?;

    if !quiet {
        let summary = changes.summary();
        tracing::info!(
            "Diff: {} changes ({} breaking, {} additions, {} modifications), recommended bump: {}",
            summary.total,
            summary.breaking,
            summary.additions,
            summary.modifications,
            changes.recommended_bump()
        );
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DiffPaths};
    use crate::diff::VersionBump;
    use crate::model::Function;

    fn config() -> DiffConfig {
        DiffConfig::from_app_config(
            DiffPaths {
                old: "old".into(),
                new: "new".into(),
            },
            AppConfig::default(),
        )
    }

    #[test]
    fn test_compute_diff_removal() {
        let mut old = Contract::empty("app");
        old.functions.push(Function::new("app", "Run"));
        let new = Contract::empty("app");

        let changes = compute_diff(&config(), &old, &new).expect("diff");
        assert_eq!(changes.summary().breaking, 1);
        assert_eq!(changes.recommended_bump(), VersionBump::Major);
    }

    #[test]
    fn test_compute_diff_identical() {
        let mut contract = Contract::empty("app");
        contract.functions.push(Function::new("app", "Run"));
        let changes = compute_diff(&config(), &contract, &contract).expect("diff");
        assert!(changes.is_empty());
    }
}
