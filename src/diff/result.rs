//! Diff result structures.

use crate::model::{Category, SymbolKind};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Compatibility classification of a change.
///
/// Variant order is the tie-break order within one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Can break code written against the old contract
    Breaking,
    /// New symbol or member with no prior counterpart
    Addition,
    /// Difference with no compatibility impact
    Modification,
}

impl Severity {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Breaking => "breaking",
            Self::Addition => "addition",
            Self::Modification => "modification",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single classified difference between two contracts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    pub kind: SymbolKind,
    pub severity: Severity,
    pub package: String,
    /// Symbol name, container-qualified for members (`AuthService.Login`)
    pub symbol: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
}

impl Change {
    /// Create a change without old/new detail.
    pub fn new(
        kind: SymbolKind,
        severity: Severity,
        package: impl Into<String>,
        symbol: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            package: package.into(),
            symbol: symbol.into(),
            description: description.into(),
            old: None,
            new: None,
        }
    }

    /// A symbol present only in the old contract.
    pub fn removed(
        kind: SymbolKind,
        package: impl Into<String>,
        symbol: impl Into<String>,
        old: impl Into<String>,
    ) -> Self {
        Self::new(kind, Severity::Breaking, package, symbol, "removed").with_old(old)
    }

    /// A symbol present only in the new contract.
    pub fn added(
        kind: SymbolKind,
        package: impl Into<String>,
        symbol: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self::new(kind, Severity::Addition, package, symbol, "added").with_new(new)
    }

    #[must_use]
    pub fn with_old(mut self, old: impl Into<String>) -> Self {
        self.old = Some(old.into());
        self
    }

    #[must_use]
    pub fn with_new(mut self, new: impl Into<String>) -> Self {
        self.new = Some(new.into());
        self
    }

    /// Attach both sides, skipping absent values.
    #[must_use]
    pub fn with_values(mut self, old: Option<&str>, new: Option<&str>) -> Self {
        self.old = old.map(str::to_string);
        self.new = new.map(str::to_string);
        self
    }

    /// Top-level category the change is reported under.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.kind.category()
    }

    #[must_use]
    pub fn is_breaking(&self) -> bool {
        self.severity == Severity::Breaking
    }

    fn sort_key(&self) -> (Category, &str, &str, SymbolKind, Severity, &str) {
        (
            self.category(),
            &self.package,
            &self.symbol,
            self.kind,
            self.severity,
            &self.description,
        )
    }
}

impl PartialOrd for Change {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Change {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.old.cmp(&other.old))
            .then_with(|| self.new.cmp(&other.new))
    }
}

/// Counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub total: usize,
    pub breaking: usize,
    pub additions: usize,
    pub modifications: usize,
}

/// The ordered, deduplicated result of comparing two contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort into canonical order and drop exact duplicates.
    pub fn from_changes(mut changes: Vec<Change>) -> Self {
        changes.sort();
        changes.dedup();
        Self { changes }
    }

    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    #[must_use]
    pub fn has_breaking(&self) -> bool {
        self.changes.iter().any(Change::is_breaking)
    }

    /// Changes of one severity, in order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(move |c| c.severity == severity)
    }

    #[must_use]
    pub fn summary(&self) -> ChangeSummary {
        let mut summary = ChangeSummary {
            total: self.changes.len(),
            ..ChangeSummary::default()
        };
        for change in &self.changes {
            match change.severity {
                Severity::Breaking => summary.breaking += 1,
                Severity::Addition => summary.additions += 1,
                Severity::Modification => summary.modifications += 1,
            }
        }
        summary
    }

    /// Version bump implied by the most severe change.
    #[must_use]
    pub fn recommended_bump(&self) -> VersionBump {
        self.changes
            .iter()
            .map(|c| match c.severity {
                Severity::Breaking => VersionBump::Major,
                Severity::Addition => VersionBump::Minor,
                Severity::Modification => VersionBump::Patch,
            })
            .max()
            .unwrap_or(VersionBump::None)
    }

    #[must_use]
    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Semantic version increment recommended for a change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    None,
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }

    /// Next version after `current`. Before 1.0.0 a breaking change bumps
    /// the minor component and anything else bumps the patch component.
    #[must_use]
    pub fn apply(self, current: &Version) -> Version {
        let mut next = Version::new(current.major, current.minor, current.patch);
        let effective = if current.major == 0 {
            match self {
                Self::Major => Self::Minor,
                Self::Minor => Self::Patch,
                other => other,
            }
        } else {
            self
        };
        match effective {
            Self::None => return current.clone(),
            Self::Patch => next.patch += 1,
            Self::Minor => {
                next.minor += 1;
                next.patch = 0;
            }
            Self::Major => {
                next.major += 1;
                next.minor = 0;
                next.patch = 0;
            }
        }
        next
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(kind: SymbolKind, severity: Severity, symbol: &str, description: &str) -> Change {
        Change::new(kind, severity, "app", symbol, description)
    }

    #[test]
    fn test_change_set_ordering_and_dedup() {
        let set = ChangeSet::from_changes(vec![
            change(SymbolKind::Constant, Severity::Modification, "B", "value changed"),
            change(SymbolKind::Method, Severity::Addition, "Svc.Z", "added"),
            change(SymbolKind::Interface, Severity::Breaking, "Svc", "removed"),
            change(SymbolKind::Method, Severity::Addition, "Svc.Z", "added"),
            change(SymbolKind::Field, Severity::Breaking, "User.ID", "type changed"),
        ]);
        let order: Vec<_> = set.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(order, vec!["Svc", "Svc.Z", "User.ID", "B"]);
    }

    #[test]
    fn test_summary_and_bump() {
        let set = ChangeSet::from_changes(vec![
            change(SymbolKind::Constant, Severity::Modification, "A", "value changed"),
            change(SymbolKind::Function, Severity::Addition, "New", "added"),
        ]);
        let summary = set.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.additions, 1);
        assert_eq!(summary.breaking, 0);
        assert!(!set.has_breaking());
        assert_eq!(set.recommended_bump(), VersionBump::Minor);
        assert_eq!(ChangeSet::new().recommended_bump(), VersionBump::None);
    }

    #[test]
    fn test_version_bump_apply() {
        let v = Version::new(1, 4, 2);
        assert_eq!(VersionBump::Major.apply(&v), Version::new(2, 0, 0));
        assert_eq!(VersionBump::Minor.apply(&v), Version::new(1, 5, 0));
        assert_eq!(VersionBump::Patch.apply(&v), Version::new(1, 4, 3));
        assert_eq!(VersionBump::None.apply(&v), v);

        let pre = Version::new(0, 3, 1);
        assert_eq!(VersionBump::Major.apply(&pre), Version::new(0, 4, 0));
        assert_eq!(VersionBump::Minor.apply(&pre), Version::new(0, 3, 2));
    }

    #[test]
    fn test_change_serialization() {
        let c = Change::removed(SymbolKind::Method, "auth", "AuthService.Login", "Login() error");
        let json = serde_json::to_value(&c).expect("serialize");
        assert_eq!(json["severity"], "breaking");
        assert_eq!(json["kind"], "method");
        assert_eq!(json["old"], "Login() error");
        assert!(json.get("new").is_none());
    }
}
