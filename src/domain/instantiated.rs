//! Instantiated type collection for RTA.

use std::collections::BTreeSet;

use crate::domain::ast::{Ast, NodeKind};
use crate::domain::walker::traverse_ast;

/// Contract names that appear as the operand of a `new` expression anywhere
/// in the program. Flow- and context-insensitive: reachability of the
/// creation site is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstantiatedTypes {
    contracts: BTreeSet<String>,
}

impl InstantiatedTypes {
    /// Walk the whole AST once and record every `new T(...)` target.
    /// Creation expressions without a resolvable type path are ignored.
    pub fn collect(ast: &Ast) -> Self {
        let mut contracts = BTreeSet::new();
        traverse_ast(ast.root(), |node| {
            if let NodeKind::NewExpression { type_name: Some(name) } = &node.kind {
                contracts.insert(name.clone());
            }
        });
        tracing::debug!(count = contracts.len(), "collected instantiated contracts");
        Self { contracts }
    }

    pub fn contains(&self, contract_name: &str) -> bool {
        self.contracts.contains(contract_name)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.contracts.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for InstantiatedTypes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            contracts: iter.into_iter().map(Into::into).collect(),
        }
    }
}
