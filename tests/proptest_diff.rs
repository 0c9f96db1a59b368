//! Property-based tests for the diff engine and contract documents.
//!
//! Ensures the differ and decoder handle arbitrary input without panicking,
//! and that the comparison invariants hold across random contracts.

use contract_tools::{
    diff::{DiffEngine, DiffOptions, Severity},
    model::{Constant, Contract, Function, Parameter, SymbolKind},
};
use proptest::prelude::*;
use std::collections::BTreeMap;

const PACKAGE: &str = "example.com/app";

fn ident() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,8}"
}

fn go_type() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["int", "string", "error", "[]byte", "*User", "map[string]int"])
        .prop_map(str::to_string)
}

/// Functions keyed by name, so every generated contract is valid.
fn functions() -> impl Strategy<Value = BTreeMap<String, (Vec<String>, Vec<String>)>> {
    prop::collection::btree_map(
        ident(),
        (
            prop::collection::vec(go_type(), 0..3),
            prop::collection::vec(go_type(), 0..2),
        ),
        0..8,
    )
}

fn constants() -> impl Strategy<Value = BTreeMap<String, u8>> {
    prop::collection::btree_map(ident(), any::<u8>(), 0..6)
}

fn contract(
    funcs: &BTreeMap<String, (Vec<String>, Vec<String>)>,
    consts: &BTreeMap<String, u8>,
    reversed: bool,
) -> Contract {
    let mut contract = Contract::empty(PACKAGE);
    for (name, (params, results)) in funcs {
        let mut func = Function::new(PACKAGE, name.clone());
        func.params = params
            .iter()
            .enumerate()
            .map(|(i, ty)| Parameter::named(format!("p{i}"), ty.clone()))
            .collect();
        func.results = results.iter().cloned().map(Parameter::unnamed).collect();
        contract.functions.push(func);
    }
    for (name, value) in consts {
        contract.constants.push(Constant {
            name: name.clone(),
            package: PACKAGE.to_string(),
            ty: None,
            value: Some(value.to_string()),
            doc: String::new(),
            position: None,
        });
    }
    if reversed {
        contract.functions.reverse();
        contract.constants.reverse();
    }
    contract
}

fn engine() -> DiffEngine {
    DiffEngine::new(DiffOptions::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn diff_with_self_is_empty(funcs in functions(), consts in constants()) {
        let c = contract(&funcs, &consts, false);
        let changes = engine().diff(&c, &c).expect("diff");
        prop_assert!(changes.is_empty());
    }

    #[test]
    fn removals_mirror_additions(
        old_funcs in functions(),
        new_funcs in functions(),
        old_consts in constants(),
        new_consts in constants(),
    ) {
        let old = contract(&old_funcs, &old_consts, false);
        let new = contract(&new_funcs, &new_consts, false);
        let forward = engine().diff(&old, &new).expect("diff");
        let backward = engine().diff(&new, &old).expect("diff");

        let removed: Vec<_> = forward
            .iter()
            .filter(|c| c.description == "removed")
            .map(|c| (c.kind, c.symbol.clone()))
            .collect();
        let added_back: Vec<_> = backward
            .iter()
            .filter(|c| c.description == "added")
            .map(|c| (c.kind, c.symbol.clone()))
            .collect();
        prop_assert_eq!(removed, added_back);
        prop_assert!(backward
            .iter()
            .filter(|c| c.description == "added")
            .all(|c| c.severity == Severity::Addition));
    }

    #[test]
    fn declaration_order_does_not_matter(
        old_funcs in functions(),
        new_funcs in functions(),
        consts in constants(),
    ) {
        let sorted = engine()
            .diff(&contract(&old_funcs, &consts, false), &contract(&new_funcs, &consts, false))
            .expect("diff");
        let shuffled = engine()
            .diff(&contract(&old_funcs, &consts, true), &contract(&new_funcs, &consts, true))
            .expect("diff");
        prop_assert_eq!(sorted, shuffled);
    }

    #[test]
    fn canonical_documents_are_order_independent(funcs in functions(), consts in constants()) {
        let forward = contract(&funcs, &consts, false).to_json().expect("encode");
        let backward = contract(&funcs, &consts, true).to_json().expect("encode");
        prop_assert_eq!(&forward, &backward);

        let decoded = Contract::from_json(&forward).expect("decode");
        prop_assert_eq!(decoded.to_json().expect("encode"), forward);
    }

    #[test]
    fn adding_a_function_yields_exactly_one_addition(
        funcs in functions(),
        extra in ident(),
        signature in (
            prop::collection::vec(go_type(), 0..3),
            prop::collection::vec(go_type(), 0..2),
        ),
        consts in constants(),
    ) {
        let added = format!("{extra}Added");
        prop_assume!(!funcs.contains_key(&added));

        let old = contract(&funcs, &consts, false);
        let mut grown = funcs.clone();
        grown.insert(added.clone(), signature);
        let new = contract(&grown, &consts, false);

        let changes = engine().diff(&old, &new).expect("diff");
        let summary: Vec<_> = changes
            .iter()
            .map(|c| (c.severity, c.kind, c.symbol.clone(), c.description.clone()))
            .collect();
        prop_assert_eq!(
            summary,
            vec![(Severity::Addition, SymbolKind::Function, added, "added".to_string())]
        );
        prop_assert!(!changes.has_breaking());
    }

    #[test]
    fn decoding_arbitrary_text_doesnt_panic(s in "\\PC{0,200}") {
        let _ = Contract::from_json(&s);
    }

    #[test]
    fn decoding_arbitrary_documents_doesnt_panic(
        name in "\\PC{0,20}",
        version in any::<u32>(),
        ty in "\\PC{0,10}",
    ) {
        let doc = serde_json::json!({
            "schema_version": version,
            "package": "app",
            "functions": [{"name": name, "params": [{"type": ty}]}],
            "unknown_field": true,
        });
        let _ = Contract::from_json(&doc.to_string());
    }
}
