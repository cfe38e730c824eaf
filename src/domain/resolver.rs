//! Name-based call resolution.
//!
//! The receiver of a call is never consulted. A bare callee name resolves to
//! every contract in the program that declares a function of that name, plus
//! the same name on each such contract's direct bases. Bases of bases are not
//! followed.

use std::collections::BTreeSet;

use crate::domain::callgraph::QualifiedFunctionId;
use crate::domain::hierarchy::ClassHierarchy;

/// Candidate targets for a call to `called_function`.
///
/// For every contract `C` in the hierarchy: if `C` declares the name, add
/// `C.name`; then for each direct base `B` of `C` that also declares it,
/// add `B.name`. Bases missing from the hierarchy are skipped.
///
/// An empty set means the name is a builtin, a local, or an external library
/// call.
pub fn resolve_function_calls(
    called_function: &str,
    hierarchy: &ClassHierarchy,
) -> BTreeSet<QualifiedFunctionId> {
    let mut targets = BTreeSet::new();

    for (contract_name, entry) in hierarchy.iter() {
        if entry.declares(called_function) {
            targets.insert(QualifiedFunctionId::new(contract_name.as_str(), called_function));
        }

        for base_name in &entry.base_contracts {
            match hierarchy.get(base_name) {
                Some(base) if base.declares(called_function) => {
                    targets.insert(QualifiedFunctionId::new(base_name.as_str(), called_function));
                }
                Some(_) => {}
                None => tracing::debug!(
                    contract = %contract_name,
                    base = %base_name,
                    "base contract not in hierarchy, skipping"
                ),
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hierarchy::HierarchyEntry;

    fn entry(bases: &[&str], functions: &[&str]) -> HierarchyEntry {
        HierarchyEntry {
            base_contracts: bases.iter().map(|s| s.to_string()).collect(),
            functions: functions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ids(targets: &BTreeSet<QualifiedFunctionId>) -> Vec<String> {
        targets.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_resolution_is_global_by_name() {
        let mut hierarchy = ClassHierarchy::default();
        hierarchy.insert("A", entry(&[], &["foo"]));
        hierarchy.insert("B", entry(&[], &["foo", "bar"]));
        hierarchy.insert("C", entry(&[], &["baz"]));

        assert_eq!(ids(&resolve_function_calls("foo", &hierarchy)), vec!["A.foo", "B.foo"]);
        assert!(resolve_function_calls("require", &hierarchy).is_empty());
    }

    #[test]
    fn test_base_contract_fallback() {
        let mut hierarchy = ClassHierarchy::default();
        hierarchy.insert("C", entry(&["D"], &["own"]));
        hierarchy.insert("D", entry(&[], &["bar"]));

        assert_eq!(ids(&resolve_function_calls("bar", &hierarchy)), vec!["D.bar"]);
    }

    #[test]
    fn test_only_direct_bases_are_consulted() {
        // E -> F -> G, and G declares `deep`. G is still found because it is a
        // hierarchy entry of its own, but not through E.
        let mut hierarchy = ClassHierarchy::default();
        hierarchy.insert("E", entry(&["F"], &[]));
        hierarchy.insert("F", entry(&["G"], &[]));
        assert!(resolve_function_calls("deep", &hierarchy).is_empty());

        hierarchy.insert("G", entry(&[], &["deep"]));
        assert_eq!(ids(&resolve_function_calls("deep", &hierarchy)), vec!["G.deep"]);
    }

    #[test]
    fn test_dangling_base_is_skipped() {
        let mut hierarchy = ClassHierarchy::default();
        hierarchy.insert("Token", entry(&["IERC20"], &["transfer"]));

        assert_eq!(
            ids(&resolve_function_calls("transfer", &hierarchy)),
            vec!["Token.transfer"]
        );
    }
}
