//! AST walking primitives.
//!
//! Pre-order traversal plus the lookups every analysis is built from:
//! locating a function definition, collecting the callee names of its call
//! sites, and visiting every node of a tree.

use crate::domain::ast::{Ast, AstNode, NodeKind};

/// Pre-order iterator over a subtree, root first, children in stored order.
pub struct PreOrder<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // reversed so the first child is popped next
        self.stack.extend(node.children.iter().rev().map(|(_, child)| child));
        Some(node)
    }
}

impl AstNode {
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

/// Invoke `visit` on every node under `root` (inclusive), exactly once, in pre-order.
pub fn traverse_ast<'a, F>(root: &'a AstNode, mut visit: F)
where
    F: FnMut(&'a AstNode),
{
    for node in root.pre_order() {
        visit(node);
    }
}

/// First top-level contract definition named `contract_name`.
pub fn find_contract_node<'a>(ast: &'a Ast, contract_name: &str) -> Option<&'a AstNode> {
    ast.top_level().find(|node| {
        matches!(&node.kind, NodeKind::ContractDefinition { name, .. } if name == contract_name)
    })
}

/// Locate `contract_name.function_name` among the direct members of top-level
/// contracts. Nested definitions are not searched. With overloads, the first
/// declaration wins.
pub fn find_function_node<'a>(
    ast: &'a Ast,
    contract_name: &str,
    function_name: &str,
) -> Option<&'a AstNode> {
    ast.top_level()
        .filter(|node| {
            matches!(&node.kind, NodeKind::ContractDefinition { name, .. } if name == contract_name)
        })
        .flat_map(|contract| contract.field("nodes"))
        .find(|member| {
            matches!(&member.kind, NodeKind::FunctionDefinition { name, .. } if name == function_name)
        })
}

/// Callee names of every call expression in the subtree, in traversal order.
/// Duplicates are kept.
pub fn find_function_calls(node: &AstNode) -> Vec<String> {
    node.pre_order()
        .filter(|n| matches!(n.kind, NodeKind::FunctionCall))
        .filter_map(get_function_call_name)
        .map(str::to_owned)
        .collect()
}

/// Name of the function a call expression invokes.
///
/// A bare identifier yields its name; a member access yields the member name
/// and drops the receiver expression. Any other callee shape yields `None`.
pub fn get_function_call_name(call: &AstNode) -> Option<&str> {
    match &call.first_field("expression")?.kind {
        NodeKind::Identifier { name } => Some(name.as_str()),
        NodeKind::MemberAccess { member_name } => Some(member_name.as_str()),
        _ => None,
    }
}
