//! Class Hierarchy Analysis.

use crate::domain::algorithm::Algorithm;
use crate::domain::ast::Ast;
use crate::domain::callgraph::CallGraph;
use crate::domain::hierarchy::{build_class_hierarchy, ClassHierarchy};
use crate::infrastructure::engine::{build_filtered_call_graph, EngineOptions};
use crate::ports::CallGraphBuilder;

/// Resolves every call site by name against the whole hierarchy and keeps
/// all candidates.
#[derive(Debug, Clone, Default)]
pub struct ChaEngine {
    options: EngineOptions,
}

impl ChaEngine {
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

    /// Build the graph against an already extracted hierarchy.
    pub fn analyze_with_hierarchy(&self, ast: &Ast, hierarchy: &ClassHierarchy) -> CallGraph {
        let cg = build_filtered_call_graph(ast, hierarchy, self.options, |_| true);
        tracing::info!(
            algorithm = %Algorithm::Cha,
            nodes = cg.node_count(),
            edges = cg.edge_count(),
            "call graph built"
        );
        cg
    }
}

impl CallGraphBuilder for ChaEngine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Cha
    }

    fn build_call_graph(&self, ast: &Ast) -> CallGraph {
        self.analyze(ast)
    }
}
