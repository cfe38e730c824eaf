// AST data structures for sol_callgraph.
// A typed view over the compact JSON AST emitted by the Solidity compiler.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::errors::{AnalysisError, Result};

pub const CONTRACT_DEFINITION: &str = "ContractDefinition";
pub const FUNCTION_DEFINITION: &str = "FunctionDefinition";
pub const FUNCTION_CALL: &str = "FunctionCall";
pub const IDENTIFIER: &str = "Identifier";
pub const MEMBER_ACCESS: &str = "MemberAccess";
pub const NEW_EXPRESSION: &str = "NewExpression";

/// A node in the abstract syntax tree.
///
/// `children` holds every object-valued field of the JSON node, keyed by the
/// field name. Array-valued fields contribute one child per object element,
/// all under the same key, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub children: Vec<(String, AstNode)>,
}

/// The node types the analyses care about. Everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    ContractDefinition {
        name: String,
        /// Direct bases, in declaration order.
        base_contracts: Vec<String>,
    },
    FunctionDefinition {
        name: String,
        kind: FunctionKind,
    },
    FunctionCall,
    Identifier {
        name: String,
    },
    MemberAccess {
        member_name: String,
    },
    NewExpression {
        /// `typeName.pathNode.name`, when present.
        type_name: Option<String>,
    },
    Other {
        node_type: Option<String>,
    },
}

/// Value of a function definition's `kind` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Constructor,
    Fallback,
    Receive,
    Other(String),
    /// The field was absent or not a string.
    Unspecified,
}

impl FunctionKind {
    fn from_field(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("function") => FunctionKind::Function,
            Some("constructor") => FunctionKind::Constructor,
            Some("fallback") => FunctionKind::Fallback,
            Some("receive") => FunctionKind::Receive,
            Some(other) => FunctionKind::Other(other.to_string()),
            None => FunctionKind::Unspecified,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, FunctionKind::Constructor)
    }
}

impl NodeKind {
    /// Classify a JSON object. A recognized `nodeType` whose required fields
    /// are missing or mistyped degrades to `Other`.
    fn classify(object: &Map<String, Value>) -> Self {
        let node_type = object.get("nodeType").and_then(Value::as_str);
        let string_field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_owned);

        let typed = match node_type {
            Some(CONTRACT_DEFINITION) => string_field("name").map(|name| NodeKind::ContractDefinition {
                name,
                base_contracts: base_contract_names(object),
            }),
            Some(FUNCTION_DEFINITION) => string_field("name").map(|name| NodeKind::FunctionDefinition {
                name,
                kind: FunctionKind::from_field(object.get("kind")),
            }),
            Some(FUNCTION_CALL) => Some(NodeKind::FunctionCall),
            Some(IDENTIFIER) => string_field("name").map(|name| NodeKind::Identifier { name }),
            Some(MEMBER_ACCESS) => {
                string_field("memberName").map(|member_name| NodeKind::MemberAccess { member_name })
            }
            Some(NEW_EXPRESSION) => Some(NodeKind::NewExpression {
                type_name: lookup_str(object, &["typeName", "pathNode", "name"]).map(str::to_owned),
            }),
            _ => None,
        };

        typed.unwrap_or_else(|| NodeKind::Other {
            node_type: node_type.map(str::to_owned),
        })
    }
}

/// Names from `baseContracts[*].baseName.name`. Specifiers without a name are skipped.
fn base_contract_names(object: &Map<String, Value>) -> Vec<String> {
    object
        .get("baseContracts")
        .and_then(Value::as_array)
        .map(|bases| {
            bases
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|base| lookup_str(base, &["baseName", "name"]))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn lookup_str<'a>(object: &'a Map<String, Value>, path: &[&str]) -> Option<&'a str> {
    let (last, parents) = path.split_last()?;
    let mut current = object;
    for key in parents {
        current = current.get(*key)?.as_object()?;
    }
    current.get(*last)?.as_str()
}

/// Object-valued children of `object`, keyed by field name, in document
/// order. Arrays (including nested arrays) are flattened.
fn child_objects(object: &Map<String, Value>) -> Vec<(&str, &Map<String, Value>)> {
    let mut out = Vec::new();
    for (key, value) in object {
        let mut pending = vec![value];
        while let Some(value) = pending.pop() {
            match value {
                Value::Object(child) => out.push((key.as_str(), child)),
                Value::Array(items) => pending.extend(items.iter().rev()),
                _ => {}
            }
        }
    }
    out
}

/// A node under construction: its kind is known, its children are being built.
struct Frame<'v> {
    key: &'v str,
    kind: NodeKind,
    children: Vec<(String, AstNode)>,
    pending: std::vec::IntoIter<(&'v str, &'v Map<String, Value>)>,
}

impl<'v> Frame<'v> {
    fn open(key: &'v str, object: &'v Map<String, Value>) -> Self {
        Frame {
            key,
            kind: NodeKind::classify(object),
            children: Vec::new(),
            pending: child_objects(object).into_iter(),
        }
    }

    fn close(self) -> (String, AstNode) {
        let node = AstNode {
            kind: self.kind,
            children: self.children,
        };
        (self.key.to_string(), node)
    }
}

impl AstNode {
    /// Build a node (and its whole subtree) from a JSON object.
    ///
    /// Uses an explicit stack, so nesting depth is bounded by memory only.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let mut ancestors: Vec<Frame<'_>> = Vec::new();
        let mut current = Frame::open("", object);
        loop {
            match current.pending.next() {
                Some((key, child)) => {
                    let parent = std::mem::replace(&mut current, Frame::open(key, child));
                    ancestors.push(parent);
                }
                None => {
                    let Some(parent) = ancestors.pop() else {
                        return current.close().1;
                    };
                    let done = std::mem::replace(&mut current, parent);
                    current.children.push(done.close());
                }
            }
        }
    }

    /// The `nodeType` this node was read from, if it had one.
    pub fn node_type(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::ContractDefinition { .. } => Some(CONTRACT_DEFINITION),
            NodeKind::FunctionDefinition { .. } => Some(FUNCTION_DEFINITION),
            NodeKind::FunctionCall => Some(FUNCTION_CALL),
            NodeKind::Identifier { .. } => Some(IDENTIFIER),
            NodeKind::MemberAccess { .. } => Some(MEMBER_ACCESS),
            NodeKind::NewExpression { .. } => Some(NEW_EXPRESSION),
            NodeKind::Other { node_type } => node_type.as_deref(),
        }
    }

    /// All children stored under `key`.
    pub fn field<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a AstNode> + 'a {
        self.children
            .iter()
            .filter(move |(name, _)| name == key)
            .map(|(_, node)| node)
    }

    pub fn first_field(&self, key: &str) -> Option<&AstNode> {
        self.children
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }
}

/// A whole source unit: the root object with its top-level `nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    root: AstNode,
}

impl Ast {
    /// Validate the root shape and build the typed tree.
    ///
    /// This is the only place that rejects input: the root must be an object
    /// carrying a `nodes` array. Anything below that is read tolerantly.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| AnalysisError::malformed("root is not a JSON object"))?;
        match object.get("nodes") {
            Some(Value::Array(_)) => {}
            Some(_) => return Err(AnalysisError::malformed("top-level `nodes` is not an array")),
            None => return Err(AnalysisError::malformed("missing top-level `nodes` array")),
        }
        Ok(Ast {
            root: AstNode::from_object(object),
        })
    }

    /// Parse a JSON document. Nesting depth is not limited: deeply nested
    /// expressions are valid ASTs.
    pub fn from_json_str(src: &str) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(src);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Self::from_value(&value)
    }

    /// Join source units into one, keeping their top-level nodes in the
    /// given order. The first unit's root kind is kept.
    pub fn combine(units: impl IntoIterator<Item = Ast>) -> Ast {
        let mut units = units.into_iter();
        let Some(first) = units.next() else {
            return Ast {
                root: AstNode {
                    kind: NodeKind::Other {
                        node_type: Some("SourceUnit".to_string()),
                    },
                    children: Vec::new(),
                },
            };
        };
        let mut root = first.root;
        for unit in units {
            root.children.extend(unit.root.children);
        }
        Ast { root }
    }

    pub fn root(&self) -> &AstNode {
        &self.root
    }

    /// Top-level nodes (`root.nodes`).
    pub fn top_level(&self) -> impl Iterator<Item = &AstNode> {
        self.root.field("nodes")
    }
}

impl TryFrom<Value> for Ast {
    type Error = AnalysisError;

    fn try_from(value: Value) -> Result<Self> {
        Ast::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for Ast {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ast::from_value(&value).map_err(serde::de::Error::custom)
    }
}
