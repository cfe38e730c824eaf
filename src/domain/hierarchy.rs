//! Contract hierarchy extraction.
//!
//! One entry per top-level contract: its direct bases and the names of the
//! functions it declares. Inheritance is not flattened.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::ast::{Ast, NodeKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyEntry {
    /// Direct bases, in declaration order.
    pub base_contracts: Vec<String>,
    /// Declared function names, constructors excluded. Overloads collapse.
    pub functions: BTreeSet<String>,
}

impl HierarchyEntry {
    pub fn declares(&self, function_name: &str) -> bool {
        self.functions.contains(function_name)
    }
}

/// Contract name to entry. Iteration is sorted by contract name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassHierarchy {
    contracts: BTreeMap<String, HierarchyEntry>,
}

impl ClassHierarchy {
    pub fn get(&self, contract_name: &str) -> Option<&HierarchyEntry> {
        self.contracts.get(contract_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HierarchyEntry)> {
        self.contracts.iter()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn insert(&mut self, contract_name: impl Into<String>, entry: HierarchyEntry) -> Option<HierarchyEntry> {
        self.contracts.insert(contract_name.into(), entry)
    }

    /// Total number of declared `(contract, function)` pairs.
    pub fn function_count(&self) -> usize {
        self.contracts.values().map(|entry| entry.functions.len()).sum()
    }
}

/// Scan the top-level contract definitions of `ast`.
///
/// A later contract with an already-seen name replaces the earlier entry.
pub fn build_class_hierarchy(ast: &Ast) -> ClassHierarchy {
    let mut hierarchy = ClassHierarchy::default();

    for node in ast.top_level() {
        let NodeKind::ContractDefinition { name, base_contracts } = &node.kind else {
            continue;
        };

        let functions = node
            .field("nodes")
            .filter_map(|member| match &member.kind {
                NodeKind::FunctionDefinition { name, kind } if !kind.is_constructor() => Some(name.clone()),
                _ => None,
            })
            .collect();

        let entry = HierarchyEntry {
            base_contracts: base_contracts.clone(),
            functions,
        };
        if hierarchy.insert(name.clone(), entry).is_some() {
            tracing::warn!(contract = %name, "duplicate contract definition, keeping the later one");
        }
    }

    tracing::debug!(
        contracts = hierarchy.len(),
        functions = hierarchy.function_count(),
        "built class hierarchy"
    );
    hierarchy
}
