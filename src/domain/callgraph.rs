// Call graph structures for sol_callgraph.
// Nodes are declared functions, keyed by `Contract.function`.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::AnalysisError;

/// A `(contract, function)` pair, rendered as `Contract.function`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedFunctionId {
    pub contract: String,
    pub function: String,
}

impl QualifiedFunctionId {
    pub fn new(contract: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for QualifiedFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.contract, self.function)
    }
}

impl FromStr for QualifiedFunctionId {
    type Err = AnalysisError;

    /// Splits on the first `.`; contract names cannot contain one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_once('.')
            .map(|(contract, function)| QualifiedFunctionId::new(contract, function))
            .ok_or_else(|| AnalysisError::malformed(format!("'{}' is not of the form Contract.function", s)))
    }
}

impl Serialize for QualifiedFunctionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QualifiedFunctionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The call graph itself: every declared function maps to the set of
/// functions it may call. Edge sets carry no order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallGraph {
    edges: HashMap<QualifiedFunctionId, HashSet<QualifiedFunctionId>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `id` is present, possibly with no outgoing edges.
    pub fn add_node(&mut self, id: QualifiedFunctionId) {
        self.edges.entry(id).or_default();
    }

    pub fn add_edge(&mut self, caller: QualifiedFunctionId, callee: QualifiedFunctionId) {
        self.edges.entry(caller).or_default().insert(callee);
    }

    pub fn callees(&self, caller: &QualifiedFunctionId) -> Option<&HashSet<QualifiedFunctionId>> {
        self.edges.get(caller)
    }

    pub fn contains_node(&self, id: &QualifiedFunctionId) -> bool {
        self.edges.contains_key(id)
    }

    pub fn contains_edge(&self, caller: &QualifiedFunctionId, callee: &QualifiedFunctionId) -> bool {
        self.edges.get(caller).is_some_and(|callees| callees.contains(callee))
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashSet::len).sum()
    }

    /// Node ids, sorted.
    pub fn nodes(&self) -> BTreeSet<&QualifiedFunctionId> {
        self.edges.keys().collect()
    }

    /// `(caller, callee)` pairs, sorted.
    pub fn edges(&self) -> BTreeSet<(&QualifiedFunctionId, &QualifiedFunctionId)> {
        self.edges
            .iter()
            .flat_map(|(caller, callees)| callees.iter().map(move |callee| (caller, callee)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedFunctionId, &HashSet<QualifiedFunctionId>)> {
        self.edges.iter()
    }

    /// True when both graphs have the same nodes and every edge of `self`
    /// is also an edge of `other`.
    pub fn is_subgraph_of(&self, other: &CallGraph) -> bool {
        self.node_count() == other.node_count()
            && self.edges.iter().all(|(caller, callees)| {
                other
                    .callees(caller)
                    .is_some_and(|theirs| callees.is_subset(theirs))
            })
    }
}

impl FromIterator<(QualifiedFunctionId, HashSet<QualifiedFunctionId>)> for CallGraph {
    fn from_iter<I: IntoIterator<Item = (QualifiedFunctionId, HashSet<QualifiedFunctionId>)>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> QualifiedFunctionId {
        s.parse().unwrap()
    }

    #[test]
    fn test_qualified_id_display_and_parse() {
        let qid = QualifiedFunctionId::new("Token", "transfer");
        assert_eq!(qid.to_string(), "Token.transfer");
        assert_eq!(id("Token.transfer"), qid);
        assert!("transfer".parse::<QualifiedFunctionId>().is_err());
        // empty function name (fallback) still round-trips
        assert_eq!(id("Token."), QualifiedFunctionId::new("Token", ""));
    }

    #[test]
    fn test_qualified_id_serde_as_string() {
        let qid = QualifiedFunctionId::new("A", "f");
        assert_eq!(serde_json::to_string(&qid).unwrap(), "\"A.f\"");
        let back: QualifiedFunctionId = serde_json::from_str("\"A.f\"").unwrap();
        assert_eq!(back, qid);
    }

    #[test]
    fn test_edges_deduplicate() {
        let mut cg = CallGraph::new();
        cg.add_node(id("A.f"));
        cg.add_edge(id("A.f"), id("B.g"));
        cg.add_edge(id("A.f"), id("B.g"));
        cg.add_node(id("A.f"));
        assert_eq!(cg.node_count(), 1);
        assert_eq!(cg.edge_count(), 1);
        assert!(cg.contains_edge(&id("A.f"), &id("B.g")));
        // edge targets are not nodes by themselves
        assert!(!cg.contains_node(&id("B.g")));
    }

    #[test]
    fn test_is_subgraph_of() {
        let mut full = CallGraph::new();
        full.add_edge(id("A.f"), id("B.g"));
        full.add_edge(id("A.f"), id("C.g"));
        full.add_node(id("B.g"));

        let mut sub = CallGraph::new();
        sub.add_edge(id("A.f"), id("C.g"));
        sub.add_node(id("B.g"));

        assert!(sub.is_subgraph_of(&full));
        assert!(!full.is_subgraph_of(&sub));

        let mut missing_node = CallGraph::new();
        missing_node.add_node(id("A.f"));
        assert!(!missing_node.is_subgraph_of(&full));
    }
}
