//! Package tree discovery.

use super::{ExtractOptions, LanguageAdapter};
use crate::error::{ContractError, ExtractErrorKind, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated
    pub relative: String,
}

/// Enumerate the source files of the package tree rooted at `root`, in
/// sorted relative-path order.
pub fn discover_files(
    root: &Path,
    adapter: &dyn LanguageAdapter,
    options: &ExtractOptions,
) -> Result<Vec<PackageFile>> {
    if !root.exists() {
        return Err(ContractError::extraction(
            format!("resolving {}", root.display()),
            ExtractErrorKind::PackageNotFound(root.to_path_buf()),
        ));
    }
    if !root.is_dir() {
        return Err(ContractError::extraction(
            format!("resolving {}", root.display()),
            ExtractErrorKind::NotADirectory(root.to_path_buf()),
        ));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| keep_dir(entry, adapter, options));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            ContractError::extraction(
                format!("walking {}", root.display()),
                ExtractErrorKind::Read {
                    path,
                    message: err.to_string(),
                },
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !adapter.is_source_file(path) {
            continue;
        }
        if !options.include_tests && adapter.is_test_file(path) {
            tracing::trace!(file = %path.display(), "skipping test file");
            continue;
        }
        files.push(PackageFile {
            relative: relative_path(root, path),
            path: path.to_path_buf(),
        });
    }

    if files.is_empty() {
        return Err(ContractError::extraction(
            format!("scanning {}", root.display()),
            ExtractErrorKind::NoSourceFiles(root.to_path_buf()),
        ));
    }
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

fn keep_dir(entry: &DirEntry, adapter: &dyn LanguageAdapter, options: &ExtractOptions) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if adapter.is_ignored_dir(&name) {
        return false;
    }
    if !options.include_internal && adapter.is_internal_dir(&name) {
        tracing::trace!(dir = %entry.path().display(), "skipping internal package");
        return false;
    }
    true
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::GoAdapter;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, "package x\n").expect("write file");
    }

    fn relatives(files: &[PackageFile]) -> Vec<&str> {
        files.iter().map(|f| f.relative.as_str()).collect()
    }

    #[test]
    fn test_discovery_honours_options() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        touch(root, "b.go");
        touch(root, "a.go");
        touch(root, "a_test.go");
        touch(root, "README.md");
        touch(root, "internal/cache/cache.go");
        touch(root, "api/v1/api.go");
        touch(root, "vendor/dep/dep.go");
        touch(root, "testdata/sample.go");
        touch(root, ".hidden/h.go");
        touch(root, "_tools/t.go");

        let adapter = GoAdapter::new();
        let files = discover_files(root, &adapter, &ExtractOptions::default()).expect("discover");
        assert_eq!(relatives(&files), vec!["a.go", "api/v1/api.go", "b.go"]);

        let options = ExtractOptions {
            include_tests: true,
            include_internal: true,
            ..ExtractOptions::default()
        };
        let files = discover_files(root, &adapter, &options).expect("discover");
        assert_eq!(
            relatives(&files),
            vec!["a.go", "a_test.go", "api/v1/api.go", "b.go", "internal/cache/cache.go"]
        );
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        let err = discover_files(&missing, &GoAdapter::new(), &ExtractOptions::default())
            .expect_err("missing root");
        assert!(matches!(
            err,
            ContractError::Extraction {
                source: ExtractErrorKind::PackageNotFound(_),
                ..
            }
        ));
    }

    #[test]
    fn test_root_is_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "main.go");
        let err = discover_files(
            &dir.path().join("main.go"),
            &GoAdapter::new(),
            &ExtractOptions::default(),
        )
        .expect_err("file root");
        assert!(matches!(
            err,
            ContractError::Extraction {
                source: ExtractErrorKind::NotADirectory(_),
                ..
            }
        ));
    }

    #[test]
    fn test_empty_package() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "notes.txt");
        let err = discover_files(dir.path(), &GoAdapter::new(), &ExtractOptions::default())
            .expect_err("no sources");
        assert!(matches!(
            err,
            ContractError::Extraction {
                source: ExtractErrorKind::NoSourceFiles(_),
                ..
            }
        ));
    }
}
