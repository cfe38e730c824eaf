// Main library entry point for sol_callgraph.
//
// CHA and RTA call graph construction over Solidity compiler JSON ASTs.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;
pub mod ports;

pub use domain::{Algorithm, Ast, CallGraph, ClassHierarchy, QualifiedFunctionId};
pub use errors::{AnalysisError, Result};
pub use infrastructure::{ChaEngine, EngineOptions, RtaEngine};
