//! Change computer implementations, one per contract category, plus the
//! comparison rules they share.

mod functions;
mod interfaces;
mod types;
mod values;

pub use functions::FunctionChangeComputer;
pub use interfaces::InterfaceChangeComputer;
pub use types::TypeChangeComputer;
pub use values::{ConstantChangeComputer, VariableChangeComputer};

use super::{Change, DiffOptions, Severity};
use crate::model::{
    member_positions, Declared, Parameter, PositionMap, SourcePosition, SymbolKind,
};
use std::collections::HashMap;

/// How a keyed entity appears across the two contracts.
pub(crate) enum Pairing<'a, T> {
    Removed(&'a T),
    Added(&'a T),
    Both(&'a T, &'a T),
}

/// Pair top-level declarations by qualified name.
pub(crate) fn pair_declared<'a, T: Declared>(
    old: &'a [T],
    old_index: &PositionMap,
    new: &'a [T],
    new_index: &PositionMap,
) -> Vec<Pairing<'a, T>> {
    let mut pairs = Vec::with_capacity(old.len().max(new.len()));
    for item in old {
        match new_index.get(&item.qualified_name()).and_then(|&i| new.get(i)) {
            Some(counterpart) => pairs.push(Pairing::Both(item, counterpart)),
            None => pairs.push(Pairing::Removed(item)),
        }
    }
    for item in new {
        if !old_index.contains_key(&item.qualified_name()) {
            pairs.push(Pairing::Added(item));
        }
    }
    pairs
}

/// Pair container members (methods, fields) by name.
pub(crate) fn pair_members<'a, T>(
    old: &'a [T],
    new: &'a [T],
    name: impl Fn(&T) -> &str,
) -> Vec<Pairing<'a, T>> {
    let old_names = member_positions(old, &name);
    let new_names = member_positions(new, &name);
    let mut pairs = Vec::with_capacity(old.len().max(new.len()));
    for item in old {
        match new_names.get(name(item)).and_then(|&i| new.get(i)) {
            Some(counterpart) => pairs.push(Pairing::Both(item, counterpart)),
            None => pairs.push(Pairing::Removed(item)),
        }
    }
    for item in new {
        if !old_names.contains_key(name(item)) {
            pairs.push(Pairing::Added(item));
        }
    }
    pairs
}

/// Identity of the symbol a comparison is about.
#[derive(Clone, Copy)]
pub(crate) struct Subject<'a> {
    pub kind: SymbolKind,
    pub package: &'a str,
    pub symbol: &'a str,
}

impl<'a> Subject<'a> {
    pub(crate) const fn new(kind: SymbolKind, package: &'a str, symbol: &'a str) -> Self {
        Self {
            kind,
            package,
            symbol,
        }
    }

    pub(crate) fn change(&self, severity: Severity, description: &str) -> Change {
        Change::new(self.kind, severity, self.package, self.symbol, description)
    }

    pub(crate) fn removed(&self, old: impl Into<String>) -> Change {
        Change::removed(self.kind, self.package, self.symbol, old)
    }

    pub(crate) fn added(&self, new: impl Into<String>) -> Change {
        Change::added(self.kind, self.package, self.symbol, new)
    }
}

/// The parts of a callable that take part in compatibility checks.
pub(crate) struct Callable<'a> {
    pub type_params: &'a [Parameter],
    pub params: &'a [Parameter],
    pub results: &'a [Parameter],
    pub rendered: String,
}

/// Compare two callables: type parameters, then positional types, then names.
///
/// Type parameters pair by position, so renaming one is reported as a name
/// change and old types are read with the new names substituted.
pub(crate) fn compare_callables(
    subject: Subject<'_>,
    old: &Callable<'_>,
    new: &Callable<'_>,
    options: &DiffOptions,
    out: &mut Vec<Change>,
) {
    let renames = type_param_renames(old.type_params, new.type_params);
    let renamed = |params: &[Parameter]| -> Vec<String> {
        params
            .iter()
            .map(|p| rename_identifiers(&p.ty, &renames))
            .collect()
    };

    if renamed(old.type_params) != types_of(new.type_params) {
        out.push(
            subject
                .change(Severity::Breaking, "type parameters changed")
                .with_values(Some(&old.rendered), Some(&new.rendered)),
        );
    } else if names_of(old.type_params) != names_of(new.type_params) {
        out.push(
            subject
                .change(Severity::Modification, "type parameter names changed")
                .with_values(Some(&old.rendered), Some(&new.rendered)),
        );
    }

    let types_equal = renamed(old.params) == types_of(new.params)
        && renamed(old.results) == types_of(new.results);
    if !types_equal {
        out.push(
            subject
                .change(Severity::Breaking, "signature changed")
                .with_values(Some(&old.rendered), Some(&new.rendered)),
        );
        return;
    }

    if names_of(old.params) != names_of(new.params)
        || names_of(old.results) != names_of(new.results)
    {
        let severity = if options.param_name_changes_breaking {
            Severity::Breaking
        } else {
            Severity::Modification
        };
        out.push(
            subject
                .change(severity, "parameter names changed")
                .with_values(Some(&old.rendered), Some(&new.rendered)),
        );
    }
}

fn types_of(params: &[Parameter]) -> Vec<String> {
    params.iter().map(|p| p.ty.clone()).collect()
}

/// Old to new type parameter names, paired by position.
///
/// Empty when the lists differ in length or nothing was renamed.
fn type_param_renames<'a>(
    old: &'a [Parameter],
    new: &'a [Parameter],
) -> HashMap<&'a str, &'a str> {
    if old.len() != new.len() {
        return HashMap::new();
    }
    old.iter()
        .zip(new)
        .filter_map(|(o, n)| Some((o.name.as_deref()?, n.name.as_deref()?)))
        .filter(|(o, n)| o != n)
        .collect()
}

/// Replace whole identifiers found in `renames`. Selector targets
/// (`pkg.T`) are left alone.
fn rename_identifiers(ty: &str, renames: &HashMap<&str, &str>) -> String {
    if renames.is_empty() {
        return ty.to_string();
    }
    let mut out = String::with_capacity(ty.len());
    let mut ident = String::new();
    let mut after_dot = false;
    let flush = |ident: &mut String, out: &mut String, after_dot: bool| {
        if ident.is_empty() {
            return;
        }
        match renames.get(ident.as_str()) {
            Some(replacement) if !after_dot => out.push_str(replacement),
            _ => out.push_str(ident),
        }
        ident.clear();
    };
    for ch in ty.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            ident.push(ch);
            continue;
        }
        flush(&mut ident, &mut out, after_dot);
        after_dot = ch == '.';
        out.push(ch);
    }
    flush(&mut ident, &mut out, after_dot);
    out
}

fn names_of(params: &[Parameter]) -> Vec<Option<&str>> {
    params.iter().map(|p| p.name.as_deref()).collect()
}

/// Documentation edits are modifications unless comments are ignored.
pub(crate) fn compare_doc(
    subject: Subject<'_>,
    old: &str,
    new: &str,
    options: &DiffOptions,
    out: &mut Vec<Change>,
) {
    if options.ignore_comments || old == new {
        return;
    }
    out.push(
        subject
            .change(Severity::Modification, "documentation changed")
            .with_values(non_empty(old), non_empty(new)),
    );
}

/// Position moves are reported only when both sides carry positions and
/// positions are not ignored.
pub(crate) fn compare_position(
    subject: Subject<'_>,
    old: Option<&SourcePosition>,
    new: Option<&SourcePosition>,
    options: &DiffOptions,
    out: &mut Vec<Change>,
) {
    if options.ignore_positions {
        return;
    }
    if let (Some(old), Some(new)) = (old, new) {
        if old != new {
            out.push(
                subject
                    .change(Severity::Modification, "position changed")
                    .with_values(Some(&old.to_string()), Some(&new.to_string())),
            );
        }
    }
}

pub(crate) fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn callable<'a>(params: &'a [Parameter], results: &'a [Parameter]) -> Callable<'a> {
        Callable {
            type_params: &[],
            params,
            results,
            rendered: crate::model::render_signature(params, results),
        }
    }

    fn run(
        old: &Callable<'_>,
        new: &Callable<'_>,
        options: &DiffOptions,
    ) -> Vec<(Severity, String)> {
        let mut out = Vec::new();
        let subject = Subject::new(SymbolKind::Function, "app", "Run");
        compare_callables(subject, old, new, options, &mut out);
        out.into_iter().map(|c| (c.severity, c.description)).collect()
    }

    #[test]
    fn test_type_change_is_breaking() {
        let old = [Parameter::named("id", "string")];
        let new = [Parameter::named("id", "int")];
        let changes = run(&callable(&old, &[]), &callable(&new, &[]), &DiffOptions::default());
        assert_eq!(changes, vec![(Severity::Breaking, "signature changed".to_string())]);
    }

    #[test]
    fn test_rename_follows_policy() {
        let old = [Parameter::named("id", "string")];
        let new = [Parameter::named("key", "string")];
        let changes = run(&callable(&old, &[]), &callable(&new, &[]), &DiffOptions::default());
        assert_eq!(
            changes,
            vec![(Severity::Modification, "parameter names changed".to_string())]
        );

        let changes = run(&callable(&old, &[]), &callable(&new, &[]), &DiffOptions::strict());
        assert_eq!(changes, vec![(Severity::Breaking, "parameter names changed".to_string())]);
    }

    #[test]
    fn test_result_count_change_is_breaking() {
        let old = [Parameter::unnamed("error")];
        let new = [Parameter::unnamed("int"), Parameter::unnamed("error")];
        let changes = run(&callable(&[], &old), &callable(&[], &new), &DiffOptions::default());
        assert_eq!(changes, vec![(Severity::Breaking, "signature changed".to_string())]);
    }

    fn generic<'a>(type_params: &'a [Parameter], params: &'a [Parameter]) -> Callable<'a> {
        Callable {
            type_params,
            params,
            results: &[],
            rendered: crate::model::render_signature(params, &[]),
        }
    }

    #[test]
    fn test_type_param_rename_is_not_breaking() {
        let old_tp = [Parameter::named("T", "any")];
        let old_params = [
            Parameter::named("items", "[]T"),
            Parameter::named("f", "func(T) bool"),
        ];
        let new_tp = [Parameter::named("U", "any")];
        let new_params = [
            Parameter::named("items", "[]U"),
            Parameter::named("f", "func(U) bool"),
        ];

        let changes = run(
            &generic(&old_tp, &old_params),
            &generic(&new_tp, &new_params),
            &DiffOptions::default(),
        );
        assert_eq!(
            changes,
            vec![(Severity::Modification, "type parameter names changed".to_string())]
        );
    }

    #[test]
    fn test_type_param_rename_with_type_change_still_breaks() {
        let old_tp = [Parameter::named("T", "any")];
        let old_params = [Parameter::named("v", "T")];
        let new_tp = [Parameter::named("U", "any")];
        let new_params = [Parameter::named("v", "[]U")];

        let changes = run(
            &generic(&old_tp, &old_params),
            &generic(&new_tp, &new_params),
            &DiffOptions::default(),
        );
        assert_eq!(
            changes,
            vec![
                (Severity::Modification, "type parameter names changed".to_string()),
                (Severity::Breaking, "signature changed".to_string()),
            ]
        );
    }

    #[test]
    fn test_rename_identifiers() {
        let renames = HashMap::from([("T", "U")]);
        assert_eq!(rename_identifiers("map[T][]T", &renames), "map[U][]U");
        assert_eq!(rename_identifiers("pkg.T", &renames), "pkg.T");
        assert_eq!(rename_identifiers("Type", &renames), "Type");
        assert_eq!(rename_identifiers("func(T) error", &HashMap::new()), "func(T) error");
    }

    #[test]
    fn test_position_requires_both_sides() {
        let options = DiffOptions {
            ignore_positions: false,
            ..DiffOptions::default()
        };
        let subject = Subject::new(SymbolKind::Function, "app", "Run");
        let here = SourcePosition {
            file: "run.go".to_string(),
            line: 3,
        };
        let there = SourcePosition {
            file: "run.go".to_string(),
            line: 9,
        };
        let mut out = Vec::new();
        compare_position(subject, Some(&here), None, &options, &mut out);
        assert!(out.is_empty());
        compare_position(subject, Some(&here), Some(&there), &DiffOptions::default(), &mut out);
        assert!(out.is_empty());
        compare_position(subject, Some(&here), Some(&there), &options, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].old.as_deref(), Some("run.go:3"));
    }
}
