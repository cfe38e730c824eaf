use crate::domain::algorithm::Algorithm;
use crate::domain::ast::Ast;
use crate::domain::callgraph::CallGraph;
use crate::domain::hierarchy::ClassHierarchy;

/// A whole-program call graph construction algorithm.
pub trait CallGraphBuilder {
    fn algorithm(&self) -> Algorithm;

    /// Build a fresh graph for `ast`. No state survives between calls.
    fn build_call_graph(&self, ast: &Ast) -> CallGraph;
}

pub trait OutputExporter {
    fn render(&self, cg: &CallGraph) -> String;

    fn export(&self, cg: &CallGraph, path: &str) -> std::io::Result<()> {
        std::fs::write(path, self.render(cg))
    }
}

pub trait HierarchyExporter {
    fn render_hierarchy(&self, hierarchy: &ClassHierarchy) -> String;
}
