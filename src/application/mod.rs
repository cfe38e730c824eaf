use crate::domain::ast::Ast;
use crate::domain::callgraph::CallGraph;
use crate::ports::{CallGraphBuilder, OutputExporter};

pub struct AnalyzeUsecase<'a> {
    pub callgraph_builder: &'a dyn CallGraphBuilder,
    pub exporter: &'a dyn OutputExporter,
}

impl<'a> AnalyzeUsecase<'a> {
    /// Build the graph and write it to `export_path`.
    pub fn run(&self, ast: &Ast, export_path: &str) -> std::io::Result<CallGraph> {
        let cg = self.callgraph_builder.build_call_graph(ast);
        self.exporter.export(&cg, export_path)?;
        Ok(cg)
    }

    /// Build the graph and render it without touching the filesystem.
    pub fn render(&self, ast: &Ast) -> (CallGraph, String) {
        let cg = self.callgraph_builder.build_call_graph(ast);
        let rendered = self.exporter.render(&cg);
        (cg, rendered)
    }
}
