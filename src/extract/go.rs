//! Go language adapter using native tree-sitter.
//!
//! Walks the syntax tree of each file directly and turns top-level
//! declarations into contract entities:
//! - interfaces with their method sets and embedded elements
//! - struct and non-struct named types (including generics)
//! - functions, and methods as `Recv.Method` functions
//! - package-level variables and constants (with `iota` repetition)

use super::traits::{Declaration, LanguageAdapter, ParsedFile, SourceFile};
use crate::error::{ContractError, ExtractErrorKind, Result};
use crate::model::{
    Constant, Field, Function, Interface, Method, Parameter, SourcePosition, TypeDecl, TypeKind,
    Variable,
};
use crate::utils::normalize_whitespace;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tree_sitter::{Node, Parser};

const GO_MOD: &str = "go.mod";

static MODULE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*module\s+"?([^\s"]+)"?"#).expect("static regex"));

static IOTA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\biota\b").expect("static regex"));

/// Adapter for Go packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoAdapter;

impl GoAdapter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LanguageAdapter for GoAdapter {
    fn name(&self) -> &'static str {
        "go"
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "go")
    }

    fn is_test_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with("_test.go"))
    }

    fn is_internal_dir(&self, name: &str) -> bool {
        name == "internal"
    }

    fn is_ignored_dir(&self, name: &str) -> bool {
        name == "vendor" || name == "testdata" || name.starts_with('.') || name.starts_with('_')
    }

    fn is_exported(&self, name: &str) -> bool {
        name.chars().next().is_some_and(char::is_uppercase)
    }

    fn module_path(&self, root: &Path) -> Result<Option<String>> {
        let path = root.join(GO_MOD);
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path).map_err(|err| ContractError::io(&path, err))?;
        Ok(parse_module_path(&content))
    }

    fn parse_file(&self, file: &SourceFile<'_>) -> Result<ParsedFile> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|err| {
                ContractError::extraction(
                    "loading Go grammar",
                    ExtractErrorKind::Language(err.to_string()),
                )
            })?;

        let tree = parser.parse(file.content, None).ok_or_else(|| {
            ContractError::syntax(file.relative_path, 1, "parser produced no tree")
        })?;
        let root = tree.root_node();
        if root.has_error() {
            let (line, message) = first_error(root, file.content.as_bytes());
            return Err(ContractError::syntax(file.relative_path, line, message));
        }

        let walker = FileWalker::new(file);
        let clause = walker
            .package_clause(root)
            .ok_or_else(|| ContractError::syntax(file.relative_path, 1, "missing package clause"))?;
        let package = package_identity(file, &clause);

        let mut declarations = Vec::new();
        walker.collect(root, &package, &mut declarations);
        Ok(ParsedFile {
            package,
            declarations,
        })
    }
}

/// Extract the `module` directive of a go.mod file.
#[must_use]
pub fn parse_module_path(content: &str) -> Option<String> {
    MODULE_DIRECTIVE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Module path joined with the file's directory; the package clause name
/// stands in when there is no module. External test packages keep their
/// `_test` suffix so they never merge with the package under test.
fn package_identity(file: &SourceFile<'_>, clause: &str) -> String {
    let dir = file.relative_dir();
    let base = match (file.module, dir.is_empty()) {
        (Some(module), true) => module.to_string(),
        (Some(module), false) => format!("{module}/{dir}"),
        (None, true) => clause.to_string(),
        (None, false) => dir.to_string(),
    };
    if clause.ends_with("_test") && !base.ends_with("_test") {
        format!("{base}_test")
    } else {
        base
    }
}

/// Locate the first error or missing node, as (1-based line, message).
fn first_error(root: Node<'_>, source: &[u8]) -> (usize, String) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            return (
                node.start_position().row + 1,
                format!("missing {}", node.kind()),
            );
        }
        if node.is_error() {
            let text = node.utf8_text(source).unwrap_or("");
            let snippet: String = text.chars().take(40).collect();
            return (
                node.start_position().row + 1,
                format!("unexpected `{}`", snippet.trim()),
            );
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    (root.start_position().row + 1, "syntax error".to_string())
}

/// Stateless traversal over one parsed file.
struct FileWalker<'a> {
    source: &'a [u8],
    relative_path: &'a str,
    record_positions: bool,
}

impl<'a> FileWalker<'a> {
    fn new(file: &SourceFile<'a>) -> Self {
        Self {
            source: file.content.as_bytes(),
            relative_path: file.relative_path,
            record_positions: file.record_positions,
        }
    }

    fn text(&self, node: Node<'_>) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn type_text(&self, node: Node<'_>) -> String {
        normalize_whitespace(self.text(node))
    }

    fn position(&self, node: Node<'_>) -> Option<SourcePosition> {
        self.record_positions.then(|| SourcePosition {
            file: self.relative_path.to_string(),
            line: u32::try_from(node.start_position().row + 1).unwrap_or(u32::MAX),
        })
    }

    fn package_clause(&self, root: Node<'_>) -> Option<String> {
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_clause")?;
        let mut cursor = clause.walk();
        let name = clause
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_identifier" || n.kind() == "identifier")?;
        Some(self.text(name).to_string())
    }

    fn collect(&self, root: Node<'_>, package: &str, out: &mut Vec<Declaration>) {
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "function_declaration" => {
                    out.push(Declaration::Function(self.function(node, package)));
                }
                "method_declaration" => {
                    if let Some(method) = self.method(node, package) {
                        out.push(Declaration::Function(method));
                    }
                }
                "type_declaration" => self.type_declaration(node, package, out),
                "const_declaration" => self.const_declaration(node, package, out),
                "var_declaration" => self.var_declaration(node, package, out),
                _ => {}
            }
        }
    }

    // ------------------------------------------------------------------
    // Documentation
    // ------------------------------------------------------------------

    /// Contiguous comment lines directly above `node`.
    fn doc(&self, node: Node<'_>) -> String {
        let mut comments = Vec::new();
        let mut expected_end = node.start_position().row;
        let mut current = node.prev_named_sibling();
        while let Some(prev) = current {
            if prev.kind() != "comment" || prev.end_position().row + 1 != expected_end {
                break;
            }
            // A comment trailing the previous declaration on its own line
            // belongs to that declaration.
            if let Some(before) = prev.prev_named_sibling() {
                if before.kind() != "comment"
                    && before.end_position().row == prev.start_position().row
                {
                    break;
                }
            }
            comments.push(prev);
            expected_end = prev.start_position().row;
            current = prev.prev_named_sibling();
        }
        comments.reverse();

        let lines: Vec<String> = comments
            .into_iter()
            .flat_map(|c| comment_lines(self.text(c)))
            .collect();
        lines.join("\n").trim().to_string()
    }

    /// Doc of one type or value spec, falling back to the declaration doc for
    /// ungrouped declarations.
    fn spec_doc(&self, spec: Node<'_>, decl: Node<'_>, spec_count: usize) -> String {
        let doc = self.doc(spec);
        if doc.is_empty() && spec_count == 1 {
            self.doc(decl)
        } else {
            doc
        }
    }

    // ------------------------------------------------------------------
    // Functions
    // ------------------------------------------------------------------

    fn function(&self, node: Node<'_>, package: &str) -> Function {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or_default();
        let mut func = Function::new(package, name);
        self.fill_signature(node, &mut func);
        func.doc = self.doc(node);
        func.position = self.position(node);
        func
    }

    fn method(&self, node: Node<'_>, package: &str) -> Option<Function> {
        let receiver = node
            .child_by_field_name("receiver")
            .and_then(|list| self.parameters(list).into_iter().next())?;
        let method_name = node.child_by_field_name("name").map(|n| self.text(n))?;
        let base = receiver_base(&receiver.ty);

        let mut func = Function::new(package, format!("{base}.{method_name}"));
        func.receiver = Some(receiver.ty);
        self.fill_signature(node, &mut func);
        func.doc = self.doc(node);
        func.position = self.position(node);
        Some(func)
    }

    fn fill_signature(&self, node: Node<'_>, func: &mut Function) {
        if let Some(tp) = node.child_by_field_name("type_parameters") {
            func.type_params = self.type_parameters(tp);
        }
        if let Some(params) = node.child_by_field_name("parameters") {
            func.params = self.parameters(params);
        }
        func.results = self.results(node);
    }

    fn results(&self, node: Node<'_>) -> Vec<Parameter> {
        match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.parameters(result),
            Some(result) => vec![Parameter::unnamed(self.type_text(result))],
            None => Vec::new(),
        }
    }

    fn parameters(&self, list: Node<'_>) -> Vec<Parameter> {
        let mut out = Vec::new();
        let mut cursor = list.walk();
        for decl in list.named_children(&mut cursor) {
            let Some(ty) = decl.child_by_field_name("type") else {
                continue;
            };
            let ty = match decl.kind() {
                "parameter_declaration" => self.type_text(ty),
                "variadic_parameter_declaration" => format!("...{}", self.type_text(ty)),
                _ => continue,
            };
            let names = self.field_names(decl, "name");
            if names.is_empty() {
                out.push(Parameter::unnamed(ty));
            } else {
                out.extend(names.into_iter().map(|n| Parameter::named(n, ty.clone())));
            }
        }
        out
    }

    fn type_parameters(&self, list: Node<'_>) -> Vec<Parameter> {
        let mut out = Vec::new();
        let mut cursor = list.walk();
        for decl in list.named_children(&mut cursor) {
            if decl.kind() != "type_parameter_declaration" {
                continue;
            }
            let constraint = decl
                .child_by_field_name("type")
                .map(|t| self.type_text(t))
                .unwrap_or_default();
            for name in self.field_names(decl, "name") {
                out.push(Parameter::named(name, constraint.clone()));
            }
        }
        out
    }

    fn field_names(&self, node: Node<'_>, field: &str) -> Vec<String> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor)
            .filter(|n| n.is_named())
            .map(|n| self.text(n).to_string())
            .collect()
    }

    // ------------------------------------------------------------------
    // Types and interfaces
    // ------------------------------------------------------------------

    fn type_declaration(&self, decl: Node<'_>, package: &str, out: &mut Vec<Declaration>) {
        let mut cursor = decl.walk();
        let specs: Vec<_> = decl
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "type_spec" || n.kind() == "type_alias")
            .collect();
        for spec in &specs {
            let doc = self.spec_doc(*spec, decl, specs.len());
            let position = self.position(*spec).or_else(|| self.position(decl));
            if let Some(item) = self.type_spec(*spec, package, doc, position) {
                out.push(item);
            }
        }
    }

    fn type_spec(
        &self,
        spec: Node<'_>,
        package: &str,
        doc: String,
        position: Option<SourcePosition>,
    ) -> Option<Declaration> {
        let name = self.text(spec.child_by_field_name("name")?).to_string();
        let ty = spec.child_by_field_name("type")?;
        let type_params = spec
            .child_by_field_name("type_parameters")
            .map(|tp| self.type_parameters(tp))
            .unwrap_or_default();

        if spec.kind() == "type_spec" && ty.kind() == "interface_type" {
            let (methods, embeds) = self.interface_body(ty);
            return Some(Declaration::Interface(Interface {
                name,
                package: package.to_string(),
                doc,
                type_params,
                methods,
                embeds,
                position,
            }));
        }

        let is_struct = spec.kind() == "type_spec" && ty.kind() == "struct_type";
        let (kind, fields, underlying) = if is_struct {
            (TypeKind::Struct, self.struct_fields(ty), None)
        } else if spec.kind() == "type_alias" {
            (TypeKind::Alias, Vec::new(), Some(format!("= {}", self.type_text(ty))))
        } else {
            (TypeKind::Alias, Vec::new(), Some(self.type_text(ty)))
        };

        Some(Declaration::Type(TypeDecl {
            name,
            package: package.to_string(),
            kind,
            doc,
            type_params,
            fields,
            underlying,
            position,
        }))
    }

    fn interface_body(&self, iface: Node<'_>) -> (Vec<Method>, Vec<String>) {
        let mut methods = Vec::new();
        let mut embeds = Vec::new();
        let mut cursor = iface.walk();
        for elem in iface.named_children(&mut cursor) {
            match elem.kind() {
                "comment" => {}
                "method_elem" | "method_spec" => {
                    let Some(name) = elem.child_by_field_name("name") else {
                        continue;
                    };
                    methods.push(Method {
                        name: self.text(name).to_string(),
                        doc: self.doc(elem),
                        params: elem
                            .child_by_field_name("parameters")
                            .map(|p| self.parameters(p))
                            .unwrap_or_default(),
                        results: self.results(elem),
                    });
                }
                _ => embeds.push(self.type_text(elem)),
            }
        }
        (methods, embeds)
    }

    fn struct_fields(&self, st: Node<'_>) -> Vec<Field> {
        let mut fields = Vec::new();
        let mut cursor = st.walk();
        let Some(list) = st
            .named_children(&mut cursor)
            .find(|n| n.kind() == "field_declaration_list")
        else {
            return fields;
        };

        let mut cursor = list.walk();
        for decl in list.named_children(&mut cursor) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let Some(ty) = decl.child_by_field_name("type") else {
                continue;
            };
            let tag = decl
                .child_by_field_name("tag")
                .map(|t| strip_delimiters(self.text(t)).to_string());
            let doc = self.doc(decl);
            let names = self.field_names(decl, "name");

            if names.is_empty() {
                // Embedded field: the text from the field start keeps a leading `*`.
                let full = &self.source[decl.start_byte()..ty.end_byte()];
                let ty_text = normalize_whitespace(std::str::from_utf8(full).unwrap_or(""));
                fields.push(Field {
                    name: embedded_name(&ty_text).to_string(),
                    ty: ty_text,
                    tag,
                    doc,
                    embedded: true,
                });
                continue;
            }

            let ty_text = self.type_text(ty);
            for name in names {
                fields.push(Field {
                    name,
                    ty: ty_text.clone(),
                    tag: tag.clone(),
                    doc: doc.clone(),
                    embedded: false,
                });
            }
        }
        fields
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    fn const_declaration(&self, decl: Node<'_>, package: &str, out: &mut Vec<Declaration>) {
        let mut cursor = decl.walk();
        let specs: Vec<_> = decl
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "const_spec")
            .collect();

        // Implicit repetition: a spec without values repeats the previous
        // type and expression list.
        let mut carried: (Option<String>, Vec<String>) = (None, Vec::new());
        for (iota, spec) in specs.iter().enumerate() {
            let values = self.expressions(*spec);
            let (ty, exprs) = if values.is_empty() {
                carried.clone()
            } else {
                let ty = spec.child_by_field_name("type").map(|t| self.type_text(t));
                carried = (ty.clone(), values.clone());
                (ty, values)
            };

            let doc = self.spec_doc(*spec, decl, specs.len());
            let names = self.field_names(*spec, "name");
            for (idx, name) in names.iter().enumerate() {
                let value = value_at(&exprs, idx, names.len()).map(|expr| {
                    if IOTA.is_match(&expr) {
                        format!("{expr} (iota = {iota})")
                    } else {
                        expr
                    }
                });
                out.push(Declaration::Constant(Constant {
                    name: name.clone(),
                    package: package.to_string(),
                    ty: ty.clone(),
                    value,
                    doc: doc.clone(),
                    position: self.position(*spec),
                }));
            }
        }
    }

    fn var_declaration(&self, decl: Node<'_>, package: &str, out: &mut Vec<Declaration>) {
        let specs = self.var_specs(decl);
        for spec in &specs {
            let ty = spec.child_by_field_name("type").map(|t| self.type_text(t));
            let values = self.expressions(*spec);
            let doc = self.spec_doc(*spec, decl, specs.len());
            let names = self.field_names(*spec, "name");
            for (idx, name) in names.iter().enumerate() {
                out.push(Declaration::Variable(Variable {
                    name: name.clone(),
                    package: package.to_string(),
                    ty: ty.clone(),
                    value: value_at(&values, idx, names.len()),
                    doc: doc.clone(),
                    position: self.position(*spec),
                }));
            }
        }
    }

    /// `var_spec` nodes, looking through `var_spec_list` wrappers.
    fn var_specs<'t>(&self, decl: Node<'t>) -> Vec<Node<'t>> {
        let mut specs = Vec::new();
        let mut cursor = decl.walk();
        for child in decl.named_children(&mut cursor) {
            match child.kind() {
                "var_spec" => specs.push(child),
                "var_spec_list" => specs.extend(self.var_specs(child)),
                _ => {}
            }
        }
        specs
    }

    fn expressions(&self, spec: Node<'_>) -> Vec<String> {
        let Some(list) = spec.child_by_field_name("value") else {
            return Vec::new();
        };
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .map(|n| self.type_text(n))
            .collect()
    }
}

/// Value for the `idx`-th name. Multi-value initializers such as
/// `a, b = f()` record the whole expression list on every name.
fn value_at(exprs: &[String], idx: usize, names: usize) -> Option<String> {
    if exprs.is_empty() {
        None
    } else if exprs.len() == names {
        exprs.get(idx).cloned()
    } else {
        Some(exprs.join(", "))
    }
}

/// Receiver type without pointer or type arguments: `*List[T]` -> `List`.
fn receiver_base(receiver: &str) -> &str {
    let trimmed = receiver.trim_start_matches('*').trim();
    trimmed.split('[').next().unwrap_or(trimmed).trim()
}

/// Field name of an embedded type: `*pkg.Base[T]` -> `Base`.
fn embedded_name(ty: &str) -> &str {
    let trimmed = ty.trim_start_matches('*').trim();
    let without_args = trimmed.split('[').next().unwrap_or(trimmed);
    without_args.rsplit('.').next().unwrap_or(without_args).trim()
}

/// Remove string literal delimiters from a struct tag.
fn strip_delimiters(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .or_else(|| tag.strip_prefix('"').and_then(|t| t.strip_suffix('"')))
        .unwrap_or(tag)
}

/// Comment text without markers. Compiler directives are not documentation.
fn comment_lines(comment: &str) -> Vec<String> {
    if let Some(line) = comment.strip_prefix("//") {
        if line.starts_with("go:") || line.starts_with("line ") {
            return Vec::new();
        }
        return vec![line.strip_prefix(' ').unwrap_or(line).trim_end().to_string()];
    }
    let inner = comment
        .strip_prefix("/*")
        .and_then(|c| c.strip_suffix("*/"))
        .unwrap_or(comment);
    inner
        .lines()
        .map(|l| {
            let l = l.trim();
            l.strip_prefix("* ").or_else(|| l.strip_prefix('*')).unwrap_or(l).to_string()
        })
        .collect()
}
