//! Rapid Type Analysis.

use crate::domain::algorithm::Algorithm;
use crate::domain::ast::Ast;
use crate::domain::callgraph::CallGraph;
use crate::domain::hierarchy::{build_class_hierarchy, ClassHierarchy};
use crate::domain::instantiated::InstantiatedTypes;
use crate::infrastructure::engine::{build_filtered_call_graph, EngineOptions};
use crate::ports::CallGraphBuilder;

/// CHA restricted to targets whose declaring contract is instantiated
/// somewhere in the program.
///
/// The instantiated set is computed per `analyze` call and never stored on
/// the engine, so one engine can be reused across ASTs.
#[derive(Debug, Clone, Default)]
pub struct RtaEngine {
    options: EngineOptions,
}

impl RtaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn analyze(&self, ast: &Ast) -> CallGraph {
        let hierarchy = build_class_hierarchy(ast);
        self.analyze_with_hierarchy(ast, &hierarchy)
    }

    pub fn analyze_with_hierarchy(&self, ast: &Ast, hierarchy: &ClassHierarchy) -> CallGraph {
        let instantiated = Self::instantiated_types(ast);
        let cg = build_filtered_call_graph(ast, hierarchy, self.options, |target| {
            instantiated.contains(&target.contract)
        });
        tracing::info!(
            algorithm = %Algorithm::Rta,
            instantiated = instantiated.len(),
            nodes = cg.node_count(),
            edges = cg.edge_count(),
            "call graph built"
        );
        cg
    }

    pub fn instantiated_types(ast: &Ast) -> InstantiatedTypes {
        InstantiatedTypes::collect(ast)
    }
}

impl CallGraphBuilder for RtaEngine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Rta
    }

    fn build_call_graph(&self, ast: &Ast) -> CallGraph {
        self.analyze(ast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::callgraph::QualifiedFunctionId;
    use serde_json::{json, Value};

    fn program(with_new: bool) -> Value {
        let mut statements = vec![json!({
            "nodeType": "ExpressionStatement",
            "expression": {
                "nodeType": "FunctionCall",
                "expression": { "nodeType": "Identifier", "name": "ping" }
            }
        })];
        if with_new {
            statements.push(json!({
                "nodeType": "ExpressionStatement",
                "expression": {
                    "nodeType": "FunctionCall",
                    "expression": {
                        "nodeType": "NewExpression",
                        "typeName": { "pathNode": { "name": "Peer" } }
                    }
                }
            }));
        }
        json!({
            "nodes": [
                {
                    "nodeType": "ContractDefinition",
                    "name": "Caller",
                    "nodes": [{
                        "nodeType": "FunctionDefinition",
                        "name": "call",
                        "kind": "function",
                        "body": { "nodeType": "Block", "statements": statements }
                    }]
                },
                {
                    "nodeType": "ContractDefinition",
                    "name": "Peer",
                    "nodes": [{ "nodeType": "FunctionDefinition", "name": "ping", "kind": "function" }]
                }
            ]
        })
    }

    #[test]
    fn test_engine_reuse_does_not_leak_instantiations() {
        let engine = RtaEngine::new();
        let caller = QualifiedFunctionId::new("Caller", "call");
        let ping = QualifiedFunctionId::new("Peer", "ping");

        let with_new = Ast::from_value(&program(true)).unwrap();
        let without_new = Ast::from_value(&program(false)).unwrap();

        assert!(engine.analyze(&with_new).contains_edge(&caller, &ping));
        // a second run on a program without `new Peer()` must not see the first run's set
        let cg = engine.analyze(&without_new);
        assert!(cg.callees(&caller).is_some_and(|callees| callees.is_empty()));
    }

    #[test]
    fn test_instantiated_types() {
        let ast = Ast::from_value(&program(true)).unwrap();
        let types = RtaEngine::instantiated_types(&ast);
        assert!(types.contains("Peer"));
        assert!(!types.contains("Caller"));
    }
}
