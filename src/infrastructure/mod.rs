// Infrastructure implementations for sol_callgraph.

pub mod ast_loader;
pub mod cha;
pub mod concurrency;
pub mod engine;
pub mod exporter;
pub mod rta;

pub use ast_loader::AstLoader;
pub use cha::ChaEngine;
pub use engine::EngineOptions;
pub use exporter::{DotExporter, JsonExporter, OutputFormat, TextExporter};
pub use rta::RtaEngine;

use crate::domain::algorithm::Algorithm;
use crate::ports::CallGraphBuilder;

/// Engine for `algorithm`.
pub fn builder_for(algorithm: Algorithm, options: EngineOptions) -> Box<dyn CallGraphBuilder + Send + Sync> {
    match algorithm {
        Algorithm::Cha => Box::new(ChaEngine::with_options(options)),
        Algorithm::Rta => Box::new(RtaEngine::with_options(options)),
    }
}
