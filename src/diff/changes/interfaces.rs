//! Interface change computer implementation.

use super::{
    compare_callables, compare_doc, compare_position, pair_declared, pair_members, Callable,
    Pairing, Subject,
};
use crate::diff::traits::{ChangeComputer, IndexedContract};
use crate::diff::{Change, DiffOptions, Severity};
use crate::model::{render_type_params, Interface, Method, SymbolKind};
use std::collections::BTreeSet;

/// Computes interface and interface method changes.
pub struct InterfaceChangeComputer;

impl InterfaceChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for InterfaceChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for InterfaceChangeComputer {
    fn compute(
        &self,
        old: &IndexedContract<'_>,
        new: &IndexedContract<'_>,
        options: &DiffOptions,
    ) -> Vec<Change> {
        let mut out = Vec::new();
        let pairs = pair_declared(
            &old.contract.interfaces,
            &old.index.interfaces,
            &new.contract.interfaces,
            &new.index.interfaces,
        );
        for pair in pairs {
            match pair {
                Pairing::Removed(iface) => {
                    out.push(subject(iface).removed(describe(iface)));
                }
                Pairing::Added(iface) => {
                    out.push(subject(iface).added(describe(iface)));
                }
                Pairing::Both(old_iface, new_iface) => {
                    compare_interface(old_iface, new_iface, options, &mut out);
                }
            }
        }
        out
    }

    fn name(&self) -> &'static str {
        "InterfaceChangeComputer"
    }
}

fn subject(iface: &Interface) -> Subject<'_> {
    Subject::new(SymbolKind::Interface, &iface.package, &iface.name)
}

fn describe(iface: &Interface) -> String {
    format!(
        "type {}{} interface",
        iface.name,
        render_type_params(&iface.type_params)
    )
}

fn compare_interface(
    old: &Interface,
    new: &Interface,
    options: &DiffOptions,
    out: &mut Vec<Change>,
) {
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

    let old_embeds: BTreeSet<&str> = old.embeds.iter().map(String::as_str).collect();
    let new_embeds: BTreeSet<&str> = new.embeds.iter().map(String::as_str).collect();
    for embed in old_embeds.difference(&new_embeds) {
        out.push(
            this.change(Severity::Breaking, "embedded element removed")
                .with_old(*embed),
        );
    }
    for embed in new_embeds.difference(&old_embeds) {
        out.push(
            this.change(Severity::Addition, "embedded element added")
                .with_new(*embed),
        );
    }

    for pair in pair_members(&old.methods, &new.methods, |m: &Method| m.name.as_str()) {
        match pair {
            Pairing::Removed(method) => {
                let symbol = member_symbol(old, method);
                out.push(method_subject(old, &symbol).removed(method.signature()));
            }
            Pairing::Added(method) => {
                let symbol = member_symbol(new, method);
                out.push(method_subject(new, &symbol).added(method.signature()));
            }
            Pairing::Both(old_method, new_method) => {
                let symbol = member_symbol(old, old_method);
                let member = method_subject(old, &symbol);
                compare_callables(
                    member,
                    &callable(old_method),
                    &callable(new_method),
                    options,
                    out,
                );
                compare_doc(member, &old_method.doc, &new_method.doc, options, out);
            }
        }
    }
}

fn member_symbol(iface: &Interface, method: &Method) -> String {
    format!("{}.{}", iface.name, method.name)
}

fn method_subject<'a>(iface: &'a Interface, symbol: &'a str) -> Subject<'a> {
    Subject::new(SymbolKind::Method, &iface.package, symbol)
}

fn callable(method: &Method) -> Callable<'_> {
    Callable {
        type_params: &[],
        params: &method.params,
        results: &method.results,
        rendered: method.signature(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contract, ContractBuilder, Parameter};

    fn login() -> Method {
        Method {
            name: "Login".to_string(),
            doc: String::new(),
            params: vec![
                Parameter::named("username", "string"),
                Parameter::named("password", "string"),
            ],
            results: vec![Parameter::unnamed("bool"), Parameter::unnamed("error")],
        }
    }

    fn auth_service(methods: Vec<Method>, embeds: &[&str], doc: &str) -> Contract {
        let mut builder = ContractBuilder::new("auth");
        builder.add_interface(Interface {
            name: "AuthService".to_string(),
            package: "auth".to_string(),
            doc: doc.to_string(),
            type_params: Vec::new(),
            methods,
            embeds: embeds.iter().map(ToString::to_string).collect(),
            position: None,
        });
        builder.build()
    }

    fn compute(
        old: &Contract,
        new: &Contract,
        options: &DiffOptions,
    ) -> Vec<(Severity, SymbolKind, String, String)> {
        let old = IndexedContract::new(old);
        let new = IndexedContract::new(new);
        let mut changes = InterfaceChangeComputer::new().compute(&old, &new, options);
        changes.sort();
        changes
            .into_iter()
            .map(|c| (c.severity, c.kind, c.symbol, c.description))
            .collect()
    }

    #[test]
    fn test_method_replaced() {
        let mut oauth = login();
        oauth.name = "LoginWithOAuth".to_string();
        oauth.params = vec![Parameter::named("token", "string")];

        let old = auth_service(vec![login()], &[], "");
        let new = auth_service(vec![oauth], &[], "");
        assert_eq!(
            compute(&old, &new, &DiffOptions::default()),
            vec![
                (
                    Severity::Breaking,
                    SymbolKind::Method,
                    "AuthService.Login".to_string(),
                    "removed".to_string()
                ),
                (
                    Severity::Addition,
                    SymbolKind::Method,
                    "AuthService.LoginWithOAuth".to_string(),
                    "added".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_embed_changes() {
        let old = auth_service(vec![], &["io.Closer"], "");
        let new = auth_service(vec![], &["io.Reader"], "");
        let changes = compute(&old, &new, &DiffOptions::default());
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].0, Severity::Breaking);
        assert_eq!(changes[0].3, "embedded element removed");
        assert_eq!(changes[1].0, Severity::Addition);
    }

    #[test]
    fn test_doc_only_edit_respects_ignore_comments() {
        let old = auth_service(vec![login()], &[], "Authenticates users.");
        let mut edited = login();
        edited.doc = "Login checks credentials.".to_string();
        let new = auth_service(vec![edited], &[], "Authenticates users and services.");

        let changes = compute(&old, &new, &DiffOptions::default());
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.0 == Severity::Modification));

        let options = DiffOptions {
            ignore_comments: true,
            ..DiffOptions::default()
        };
        assert!(compute(&old, &new, &options).is_empty());
    }

    #[test]
    fn test_interface_removed() {
        let old = auth_service(vec![login()], &[], "");
        let new = Contract::empty("auth");
        let changes = compute(&old, &new, &DiffOptions::default());
        assert_eq!(
            changes,
            vec![(
                Severity::Breaking,
                SymbolKind::Interface,
                "AuthService".to_string(),
                "removed".to_string()
            )]
        );
    }

    fn set_interface(constraint: &str) -> Contract {
        let mut builder = ContractBuilder::new("sets");
        builder.add_interface(Interface {
            name: "Set".to_string(),
            package: "sets".to_string(),
            doc: String::new(),
            type_params: vec![Parameter::named("T", constraint)],
            methods: vec![Method {
                name: "Has".to_string(),
                doc: String::new(),
                params: vec![Parameter::named("v", "T")],
                results: vec![Parameter::unnamed("bool")],
            }],
            embeds: Vec::new(),
            position: None,
        });
        builder.build()
    }

    fn raw_changes(old: &Contract, new: &Contract) -> Vec<Change> {
        InterfaceChangeComputer::new().compute(
            &IndexedContract::new(old),
            &IndexedContract::new(new),
            &DiffOptions::default(),
        )
    }

    #[test]
    fn test_narrowed_constraint_is_breaking() {
        let changes = raw_changes(&set_interface("any"), &set_interface("comparable"));

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].symbol, "Set");
        assert_eq!(changes[0].description, "type parameters changed");
        assert!(changes[0].is_breaking());
        assert_eq!(changes[0].old.as_deref(), Some("[T any]"));
        assert_eq!(changes[0].new.as_deref(), Some("[T comparable]"));
    }

    #[test]
    fn test_generic_interface_described_with_params() {
        let changes = raw_changes(&Contract::empty("sets"), &set_interface("any"));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].new.as_deref(), Some("type Set[T any] interface"));
    }
}
