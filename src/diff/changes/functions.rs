//! Function and receiver method change computer implementation.

use super::{
    compare_callables, compare_doc, compare_position, pair_declared, Callable, Pairing, Subject,
};
use crate::diff::traits::{ChangeComputer, IndexedContract};
use crate::diff::{Change, DiffOptions, Severity};
use crate::model::{Function, SymbolKind};

/// Computes package-level function and method changes.
pub struct FunctionChangeComputer;

impl FunctionChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for FunctionChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for FunctionChangeComputer {
    fn compute(
        &self,
        old: &IndexedContract<'_>,
        new: &IndexedContract<'_>,
        options: &DiffOptions,
    ) -> Vec<Change> {
        let mut out = Vec::new();
        let pairs = pair_declared(
            &old.contract.functions,
            &old.index.functions,
            &new.contract.functions,
            &new.index.functions,
        );
        for pair in pairs {
            match pair {
                Pairing::Removed(func) => out.push(subject(func).removed(func.signature())),
                Pairing::Added(func) => out.push(subject(func).added(func.signature())),
                Pairing::Both(old_func, new_func) => {
                    compare_function(old_func, new_func, options, &mut out);
                }
            }
        }
        out
    }

    fn name(&self) -> &'static str {
        "FunctionChangeComputer"
    }
}

fn subject(func: &Function) -> Subject<'_> {
    Subject::new(SymbolKind::Function, &func.package, &func.name)
}

fn callable(func: &Function) -> Callable<'_> {
    Callable {
        type_params: &func.type_params,
        params: &func.params,
        results: &func.results,
        rendered: func.signature(),
    }
}

fn compare_function(old: &Function, new: &Function, options: &DiffOptions, out: &mut Vec<Change>) {
    let this = subject(old);
    if old.receiver != new.receiver {
        out.push(
            this.change(Severity::Breaking, "receiver changed")
                .with_values(old.receiver.as_deref(), new.receiver.as_deref()),
        );
    }
    compare_callables(this, &callable(old), &callable(new), options, out);
    compare_doc(this, &old.doc, &new.doc, options, out);
    compare_position(this, old.position.as_ref(), new.position.as_ref(), options, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contract, ContractBuilder, Parameter};

    fn contract(functions: Vec<Function>) -> Contract {
        let mut builder = ContractBuilder::new("users");
        for func in functions {
            builder.add_function(func);
        }
        builder.build()
    }

    fn compute(old: &Contract, new: &Contract, options: &DiffOptions) -> Vec<Change> {
        let mut changes = FunctionChangeComputer::new().compute(
            &IndexedContract::new(old),
            &IndexedContract::new(new),
            options,
        );
        changes.sort();
        changes
    }

    fn validate(receiver: &str) -> Function {
        let mut func = Function::new("users", "User.Validate");
        func.receiver = Some(receiver.to_string());
        func.results = vec![Parameter::unnamed("error")];
        func
    }

    #[test]
    fn test_signature_change_carries_both_sides() {
        let mut old = Function::new("users", "Lookup");
        old.params = vec![Parameter::named("id", "string")];
        let mut new = old.clone();
        new.params.push(Parameter::named("strict", "bool"));

        let changes = compute(&contract(vec![old]), &contract(vec![new]), &DiffOptions::default());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].description, "signature changed");
        assert_eq!(changes[0].old.as_deref(), Some("func Lookup(id string)"));
        assert_eq!(changes[0].new.as_deref(), Some("func Lookup(id string, strict bool)"));
    }

    #[test]
    fn test_receiver_change_is_breaking() {
        let changes = compute(
            &contract(vec![validate("User")]),
            &contract(vec![validate("*User")]),
            &DiffOptions::default(),
        );
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].symbol, "User.Validate");
        assert_eq!(changes[0].description, "receiver changed");
        assert!(changes[0].is_breaking());
    }

    #[test]
    fn test_added_and_removed() {
        let changes = compute(
            &contract(vec![Function::new("users", "Old")]),
            &contract(vec![Function::new("users", "New")]),
            &DiffOptions::default(),
        );
        let summary: Vec<_> = changes
            .iter()
            .map(|c| (c.symbol.as_str(), c.severity))
            .collect();
        assert_eq!(summary, vec![("New", Severity::Addition), ("Old", Severity::Breaking)]);
    }

    #[test]
    fn test_generic_constraint_change() {
        let mut old = Function::new("users", "Keys");
        old.type_params = vec![Parameter::named("K", "comparable")];
        let mut new = old.clone();
        new.type_params = vec![Parameter::named("K", "any")];

        let changes = compute(&contract(vec![old]), &contract(vec![new]), &DiffOptions::default());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].description, "type parameters changed");
    }
}
