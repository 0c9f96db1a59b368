//! Contract extraction from source packages.
//!
//! The [`Extractor`] walks a package tree, parses every admitted file through
//! a [`LanguageAdapter`] in parallel, and aggregates the declarations into a
//! canonical [`Contract`]. Extraction is all-or-nothing: the first unreadable
//! or unparsable file (in path order) fails the whole run.

mod go;
mod package;
mod traits;

pub use go::{parse_module_path, GoAdapter};
pub use package::{discover_files, PackageFile};
pub use traits::{Declaration, LanguageAdapter, ParsedFile, SourceFile};

use crate::error::{ContractError, ErrorContext, ExtractErrorKind, Result};
use crate::model::{Contract, ContractBuilder, Field, Method};
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling which symbols enter a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractOptions {
    /// Admit unexported symbols and members
    pub include_private: bool,
    /// Parse test-only source files
    pub include_tests: bool,
    /// Descend into internal sub-packages
    pub include_internal: bool,
    /// Record declaration file and line
    pub record_positions: bool,
}

/// Builds contracts from package directories.
pub struct Extractor {
    adapter: Box<dyn LanguageAdapter>,
    options: ExtractOptions,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

impl Extractor {
    /// Create an extractor for Go packages.
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            adapter: Box::new(GoAdapter::new()),
            options,
        }
    }

    /// Use a different language adapter.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Box<dyn LanguageAdapter>) -> Self {
        self.adapter = adapter;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract the contract of the package tree rooted at `root`.
    pub fn extract(&self, root: &Path) -> Result<Contract> {
        let files = discover_files(root, self.adapter.as_ref(), &self.options)?;
        let module = self
            .adapter
            .module_path(root)
            .with_context(|| format!("reading module of {}", root.display()))?;
        tracing::debug!(
            language = self.adapter.name(),
            files = files.len(),
            module = module.as_deref().unwrap_or("-"),
            "parsing package"
        );

        let parsed: Vec<Result<ParsedFile>> = files
            .par_iter()
            .map(|file| self.parse_one(file, module.as_deref()))
            .collect();
        let parsed = parsed
            .into_iter()
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("extracting {}", root.display()))?;

        let package = module
            .or_else(|| root_package(&files, &parsed))
            .unwrap_or_else(|| dir_name(root));
        let contract = self.aggregate(package, &files, parsed);
        tracing::info!(
            package = %contract.package,
            symbols = contract.symbol_count(),
            "extracted contract"
        );
        Ok(contract)
    }

    fn parse_one(&self, file: &PackageFile, module: Option<&str>) -> Result<ParsedFile> {
        let content = std::fs::read_to_string(&file.path).map_err(|err| {
            ContractError::extraction(
                format!("reading {}", file.relative),
                ExtractErrorKind::Read {
                    path: file.path.clone(),
                    message: err.to_string(),
                },
            )
        })?;
        let source = SourceFile {
            relative_path: &file.relative,
            content: &content,
            module,
            record_positions: self.options.record_positions,
        };
        let parsed = self.adapter.parse_file(&source)?;
        tracing::debug!(
            file = %file.relative,
            declarations = parsed.declarations.len(),
            "parsed file"
        );
        Ok(parsed)
    }

    /// Fold per-file declarations into one contract, in file order.
    fn aggregate(
        &self,
        package: String,
        files: &[PackageFile],
        parsed: Vec<ParsedFile>,
    ) -> Contract {
        let mut builder = ContractBuilder::new(package);
        for (file, parsed) in files.iter().zip(parsed) {
            for declaration in parsed.declarations {
                let Some(declaration) = self.admit(declaration) else {
                    continue;
                };
                let name = declaration.name().to_string();
                let kind = declaration.kind();
                let collided = match declaration {
                    Declaration::Interface(d) => builder.add_interface(d),
                    Declaration::Type(d) => builder.add_type(d),
                    Declaration::Function(d) => builder.add_function(d),
                    Declaration::Variable(d) => builder.add_variable(d),
                    Declaration::Constant(d) => builder.add_constant(d),
                };
                if collided {
                    tracing::warn!(
                        package = %parsed.package,
                        symbol = %name,
                        %kind,
                        file = %file.relative,
                        "symbol declared more than once; keeping the first declaration"
                    );
                }
            }
        }
        builder.build()
    }

    /// Apply visibility rules to a declaration and its members.
    fn admit(&self, declaration: Declaration) -> Option<Declaration> {
        if self.options.include_private {
            return Some(declaration);
        }
        // Methods on types are named `Recv.Method`; both parts must be exported.
        if !declaration.name().split('.').all(|part| self.adapter.is_exported(part)) {
            return None;
        }
        Some(match declaration {
            Declaration::Interface(mut iface) => {
                iface.methods.retain(|m: &Method| self.adapter.is_exported(&m.name));
                Declaration::Interface(iface)
            }
            Declaration::Type(mut ty) => {
                ty.fields.retain(|f: &Field| self.adapter.is_exported(&f.name));
                Declaration::Type(ty)
            }
            other => other,
        })
    }
}

/// Package of the files directly in the root directory.
fn root_package(files: &[PackageFile], parsed: &[ParsedFile]) -> Option<String> {
    files
        .iter()
        .zip(parsed)
        .find(|(file, parsed)| !file.relative.contains('/') && !parsed.package.ends_with("_test"))
        .map(|(_, parsed)| parsed.package.clone())
}

fn dir_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
