// Domain layer: the typed AST and the analyses over it.

pub mod algorithm;
pub mod ast;
pub mod callgraph;
pub mod hierarchy;
pub mod instantiated;
pub mod resolver;
pub mod walker;

pub use algorithm::Algorithm;
pub use ast::{Ast, AstNode, FunctionKind, NodeKind};
pub use callgraph::{CallGraph, QualifiedFunctionId};
pub use hierarchy::{build_class_hierarchy, ClassHierarchy, HierarchyEntry};
pub use instantiated::InstantiatedTypes;
pub use resolver::resolve_function_calls;
pub use walker::{find_function_calls, find_function_node, get_function_call_name, traverse_ast};
