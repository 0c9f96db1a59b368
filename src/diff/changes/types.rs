//! Named type change computer implementation.

use super::{compare_doc, compare_position, pair_declared, pair_members, Pairing, Subject};
use crate::diff::traits::{ChangeComputer, IndexedContract};
use crate::diff::{Change, DiffOptions, Severity};
use crate::model::{render_type_params, Field, SymbolKind, TypeDecl, TypeKind};

/// Computes named type and struct field changes.
pub struct TypeChangeComputer;

impl TypeChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TypeChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for TypeChangeComputer {
    fn compute(
        &self,
        old: &IndexedContract<'_>,
        new: &IndexedContract<'_>,
        options: &DiffOptions,
    ) -> Vec<Change> {
        let mut out = Vec::new();
        let pairs = pair_declared(
            &old.contract.types,
            &old.index.types,
            &new.contract.types,
            &new.index.types,
        );
        for pair in pairs {
            match pair {
                Pairing::Removed(ty) => out.push(subject(ty).removed(describe(ty))),
                Pairing::Added(ty) => out.push(subject(ty).added(describe(ty))),
                Pairing::Both(old_ty, new_ty) => compare_type(old_ty, new_ty, options, &mut out),
            }
        }
        out
    }

    fn name(&self) -> &'static str {
        "TypeChangeComputer"
    }
}

fn subject(ty: &TypeDecl) -> Subject<'_> {
    Subject::new(SymbolKind::Type, &ty.package, &ty.name)
}

/// `type User struct`, `type Role string`, `type Handler = func()`.
fn describe(ty: &TypeDecl) -> String {
    let head = format!("type {}{}", ty.name, render_type_params(&ty.type_params));
    match (ty.kind, &ty.underlying) {
        (TypeKind::Struct, _) => format!("{head} struct"),
        (TypeKind::Alias, Some(underlying)) => format!("{head} {underlying}"),
        (TypeKind::Alias, None) => head,
    }
}

fn describe_field(field: &Field) -> String {
    match &field.tag {
        Some(tag) => format!("{} {} `{tag}`", field.name, field.ty),
        None => format!("{} {}", field.name, field.ty),
    }
}

fn compare_type(old: &TypeDecl, new: &TypeDecl, options: &DiffOptions, out: &mut Vec<Change>) {
    let this = subject(old);
    compare_doc(this, &old.doc, &new.doc, options, out);
    compare_position(this, old.position.as_ref(), new.position.as_ref(), options, out);

    if old.type_params != new.type_params {
        out.push(
            this.change(Severity::Breaking, "type parameters changed")
                .with_values(
                    Some(&render_type_params(&old.type_params)),
                    Some(&render_type_params(&new.type_params)),
                ),
        );
    }

    // A kind change subsumes every field and underlying-type difference.
    if old.kind != new.kind {
        out.push(
            this.change(Severity::Breaking, "kind changed")
                .with_values(Some(old.kind.name()), Some(new.kind.name())),
        );
        return;
    }

    if old.underlying != new.underlying {
        out.push(
            this.change(Severity::Breaking, "underlying type changed")
                .with_values(old.underlying.as_deref(), new.underlying.as_deref()),
        );
    }

    for pair in pair_members(&old.fields, &new.fields, |f: &Field| f.name.as_str()) {
        match pair {
            Pairing::Removed(field) => {
                let symbol = member_symbol(old, field);
                out.push(field_subject(old, &symbol).removed(describe_field(field)));
            }
            Pairing::Added(field) => {
                let symbol = member_symbol(new, field);
                out.push(field_subject(new, &symbol).added(describe_field(field)));
            }
            Pairing::Both(old_field, new_field) => {
                let symbol = member_symbol(old, old_field);
                compare_field(field_subject(old, &symbol), old_field, new_field, options, out);
            }
        }
    }
}

fn compare_field(
    member: Subject<'_>,
    old: &Field,
    new: &Field,
    options: &DiffOptions,
    out: &mut Vec<Change>,
) {
    if old.ty != new.ty || old.embedded != new.embedded {
        out.push(
            member
                .change(Severity::Breaking, "type changed")
                .with_values(Some(&old.ty), Some(&new.ty)),
        );
    }
    if old.tag != new.tag {
        let severity = if options.tag_changes_breaking {
            Severity::Breaking
        } else {
            Severity::Modification
        };
        out.push(
            member
                .change(severity, "tag changed")
                .with_values(old.tag.as_deref(), new.tag.as_deref()),
        );
    }
    compare_doc(member, &old.doc, &new.doc, options, out);
}

fn member_symbol(ty: &TypeDecl, field: &Field) -> String {
    format!("{}.{}", ty.name, field.name)
}

fn field_subject<'a>(ty: &'a TypeDecl, symbol: &'a str) -> Subject<'a> {
    Subject::new(SymbolKind::Field, &ty.package, symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contract, ContractBuilder, Parameter};

    fn user(fields: Vec<Field>) -> TypeDecl {
        TypeDecl {
            name: "User".to_string(),
            package: "users".to_string(),
            kind: TypeKind::Struct,
            doc: String::new(),
            type_params: Vec::new(),
            fields,
            underlying: None,
            position: None,
        }
    }

    fn contract(ty: TypeDecl) -> Contract {
        let mut builder = ContractBuilder::new("users");
        builder.add_type(ty);
        builder.build()
    }

    fn compute(old: TypeDecl, new: TypeDecl, options: &DiffOptions) -> Vec<Change> {
        let (old, new) = (contract(old), contract(new));
        let mut changes = TypeChangeComputer::new().compute(
            &IndexedContract::new(&old),
            &IndexedContract::new(&new),
            options,
        );
        changes.sort();
        changes
    }

    #[test]
    fn test_field_type_change_is_breaking() {
        let changes = compute(
            user(vec![Field::new("ID", "string")]),
            user(vec![Field::new("ID", "int")]),
            &DiffOptions::default(),
        );
        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.severity, Severity::Breaking);
        assert_eq!(change.kind, SymbolKind::Field);
        assert_eq!(change.symbol, "User.ID");
        assert_eq!(change.description, "type changed");
        assert_eq!(change.old.as_deref(), Some("string"));
        assert_eq!(change.new.as_deref(), Some("int"));
    }

    #[test]
    fn test_tag_change_follows_policy() {
        let old = user(vec![Field::new("ID", "string").with_tag("json:\"id\"")]);
        let new = user(vec![Field::new("ID", "string").with_tag("json:\"user_id\"")]);

        let changes = compute(old.clone(), new.clone(), &DiffOptions::default());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].severity, Severity::Modification);
        assert_eq!(changes[0].description, "tag changed");

        let changes = compute(old, new, &DiffOptions::strict());
        assert_eq!(changes[0].severity, Severity::Breaking);
    }

    #[test]
    fn test_fields_added_and_removed() {
        let changes = compute(
            user(vec![Field::new("ID", "string"), Field::new("Nick", "string")]),
            user(vec![Field::new("ID", "string"), Field::new("Email", "string")]),
            &DiffOptions::default(),
        );
        let summary: Vec<_> = changes
            .iter()
            .map(|c| (c.symbol.as_str(), c.severity, c.description.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("User.Email", Severity::Addition, "added"),
                ("User.Nick", Severity::Breaking, "removed"),
            ]
        );
    }

    #[test]
    fn test_kind_change_skips_fields() {
        let mut alias = user(Vec::new());
        alias.kind = TypeKind::Alias;
        alias.underlying = Some("string".to_string());
        let changes = compute(
            user(vec![Field::new("ID", "string")]),
            alias,
            &DiffOptions::default(),
        );
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].description, "kind changed");
        assert_eq!(changes[0].old.as_deref(), Some("struct"));
    }

    #[test]
    fn test_underlying_and_type_params() {
        let mut old = user(Vec::new());
        old.kind = TypeKind::Alias;
        old.underlying = Some("string".to_string());
        let mut new = old.clone();
        new.underlying = Some("[]byte".to_string());
        new.type_params = vec![Parameter::named("T", "any")];

        let changes = compute(old, new, &DiffOptions::default());
        let descriptions: Vec<_> = changes.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(descriptions, vec!["type parameters changed", "underlying type changed"]);
        assert!(changes.iter().all(Change::is_breaking));
    }
}
