//! Edge construction shared by the CHA and RTA engines.

use std::collections::HashSet;

use dashmap::DashMap;
use rayon::prelude::*;

use crate::domain::ast::Ast;
use crate::domain::callgraph::{CallGraph, QualifiedFunctionId};
use crate::domain::hierarchy::ClassHierarchy;
use crate::domain::resolver::resolve_function_calls;
use crate::domain::walker::{find_function_calls, find_function_node};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Compute per-function edge sets on the rayon pool.
    pub parallel: bool,
}

/// Every declared `(contract, function)` pair, in hierarchy order.
pub fn declared_functions(hierarchy: &ClassHierarchy) -> Vec<QualifiedFunctionId> {
    hierarchy
        .iter()
        .flat_map(|(contract, entry)| {
            entry
                .functions
                .iter()
                .map(move |function| QualifiedFunctionId::new(contract.as_str(), function.as_str()))
        })
        .collect()
}

/// Build the graph over all declared functions, keeping only resolved
/// targets accepted by `keep`. Every declared function gets a node.
pub fn build_filtered_call_graph<F>(
    ast: &Ast,
    hierarchy: &ClassHierarchy,
    options: EngineOptions,
    keep: F,
) -> CallGraph
where
    F: Fn(&QualifiedFunctionId) -> bool + Sync,
{
    let functions = declared_functions(hierarchy);

    if options.parallel {
        // Thread-safe accumulation, one entry per function
        let edges: DashMap<QualifiedFunctionId, HashSet<QualifiedFunctionId>> = DashMap::new();
        functions.into_par_iter().for_each(|id| {
            let callees = analyze_function(ast, hierarchy, &id, &keep);
            edges.insert(id, callees);
        });
        edges.into_iter().collect()
    } else {
        functions
            .into_iter()
            .map(|id| {
                let callees = analyze_function(ast, hierarchy, &id, &keep);
                (id, callees)
            })
            .collect()
    }
}

/// Outgoing edges of one function. A function without an AST node has none.
pub fn analyze_function<F>(
    ast: &Ast,
    hierarchy: &ClassHierarchy,
    id: &QualifiedFunctionId,
    keep: &F,
) -> HashSet<QualifiedFunctionId>
where
    F: Fn(&QualifiedFunctionId) -> bool,
{
    let Some(function_node) = find_function_node(ast, &id.contract, &id.function) else {
        tracing::debug!(function = %id, "no AST node for declared function");
        return HashSet::new();
    };

    let mut callees = HashSet::new();
    for called in find_function_calls(function_node) {
        callees.extend(
            resolve_function_calls(&called, hierarchy)
                .into_iter()
                .filter(|target| keep(target)),
        );
    }

    tracing::trace!(function = %id, callees = callees.len(), "resolved call sites");
    callees
}
