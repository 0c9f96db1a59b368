//! Output handling for reports and contract documents.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }

    /// Check if output is to a terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Resolve `Auto` to a concrete format.
///
/// File targets take the format their extension names; everything else
/// falls back to plain text.
pub fn auto_detect_format(format: ReportFormat, target: &OutputTarget) -> ReportFormat {
    match (format, target) {
        (ReportFormat::Auto, OutputTarget::File(path)) => {
            ReportFormat::from_path(path).unwrap_or(ReportFormat::Text)
        }
        (ReportFormat::Auto, OutputTarget::Stdout) => ReportFormat::Text,
        (other, _) => other,
    }
}

/// Determine if color should be used based on flags and environment
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            if content.ends_with('\n') {
                print!("{content}");
            } else {
                println!("{content}");
            }
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Output written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/changes.json");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_auto_detect_format_non_auto() {
        let target = OutputTarget::File(PathBuf::from("changes.md"));
        assert_eq!(
            auto_detect_format(ReportFormat::Json, &target),
            ReportFormat::Json
        );
    }

    #[test]
    fn test_auto_detect_format_from_extension() {
        let md = OutputTarget::File(PathBuf::from("out/CHANGES.md"));
        assert_eq!(auto_detect_format(ReportFormat::Auto, &md), ReportFormat::Markdown);

        let unknown = OutputTarget::File(PathBuf::from("out/changes.log"));
        assert_eq!(auto_detect_format(ReportFormat::Auto, &unknown), ReportFormat::Text);

        assert_eq!(
            auto_detect_format(ReportFormat::Auto, &OutputTarget::Stdout),
            ReportFormat::Text
        );
    }

    #[test]
    fn test_should_use_color_with_flag() {
        assert!(!should_use_color(true));
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let path = tmp.path().join("report.txt");
        write_output("hello\n", &OutputTarget::File(path.clone()), true).expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "hello\n");
    }
}
