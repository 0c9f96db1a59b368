//! Variable and constant change computers.
//!
//! Both categories share one comparison: a declared type change breaks
//! callers, a value-only change does not.

use super::{compare_doc, compare_position, pair_declared, Pairing, Subject};
use crate::diff::traits::{ChangeComputer, IndexedContract};
use crate::diff::{Change, DiffOptions, Severity};
use crate::model::{render_value, Constant, Declared, PositionMap, Variable};

/// Accessors shared by variables and constants.
trait ValueDecl: Declared {
    const KEYWORD: &'static str;

    fn ty(&self) -> Option<&str>;
    fn value(&self) -> Option<&str>;

    fn describe(&self) -> String {
        format!("{} {}", Self::KEYWORD, render_value(self.name(), self.ty(), self.value()))
    }
}

impl ValueDecl for Variable {
    const KEYWORD: &'static str = "var";

    fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ValueDecl for Constant {
    const KEYWORD: &'static str = "const";

    fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

fn compute_values<T: ValueDecl>(
    old: &[T],
    old_index: &PositionMap,
    new: &[T],
    new_index: &PositionMap,
    options: &DiffOptions,
) -> Vec<Change> {
    let mut out = Vec::new();
    for pair in pair_declared(old, old_index, new, new_index) {
        match pair {
            Pairing::Removed(item) => out.push(subject(item).removed(item.describe())),
            Pairing::Added(item) => out.push(subject(item).added(item.describe())),
            Pairing::Both(old_item, new_item) => {
                compare_value(old_item, new_item, options, &mut out);
            }
        }
    }
    out
}

fn subject<T: ValueDecl>(item: &T) -> Subject<'_> {
    Subject::new(T::KIND, item.package(), item.name())
}

fn compare_value<T: ValueDecl>(old: &T, new: &T, options: &DiffOptions, out: &mut Vec<Change>) {
    let this = subject(old);
    if old.ty() != new.ty() {
        out.push(
            this.change(Severity::Breaking, "type changed")
                .with_values(old.ty(), new.ty()),
        );
    } else if old.value() != new.value() {
        out.push(
            this.change(Severity::Modification, "value changed")
                .with_values(old.value(), new.value()),
        );
    }
    compare_doc(this, old.doc(), new.doc(), options, out);
    compare_position(this, old.position(), new.position(), options, out);
}

/// Computes package-level variable changes.
pub struct VariableChangeComputer;

impl VariableChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for VariableChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for VariableChangeComputer {
    fn compute(
        &self,
        old: &IndexedContract<'_>,
        new: &IndexedContract<'_>,
        options: &DiffOptions,
    ) -> Vec<Change> {
        compute_values(
            &old.contract.variables,
            &old.index.variables,
            &new.contract.variables,
            &new.index.variables,
            options,
        )
    }

    fn name(&self) -> &'static str {
        "VariableChangeComputer"
    }
}

/// Computes package-level constant changes.
pub struct ConstantChangeComputer;

impl ConstantChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ConstantChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for ConstantChangeComputer {
    fn compute(
        &self,
        old: &IndexedContract<'_>,
        new: &IndexedContract<'_>,
        options: &DiffOptions,
    ) -> Vec<Change> {
        compute_values(
            &old.contract.constants,
            &old.index.constants,
            &new.contract.constants,
            &new.index.constants,
            options,
        )
    }

    fn name(&self) -> &'static str {
        "ConstantChangeComputer"
    }
}
