use serde::{Deserialize, Serialize};
use crate::domain::callgraph::CallGraph;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphDto {
    pub nodes: Vec<NodeDto>,
    pub edges: Vec<EdgeDto>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NodeDto {
    pub id: String,
    pub contract: String,
    pub function: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EdgeDto {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl From<&CallGraph> for GraphDto {
    fn from(cg: &CallGraph) -> Self {
        // sorted so output is stable across runs
        let nodes = cg
            .nodes()
            .into_iter()
            .map(|id| NodeDto {
                id: id.to_string(),
                contract: id.contract.clone(),
                function: id.function.clone(),
            })
            .collect();

        let edges = cg
            .edges()
            .into_iter()
            .map(|(from, to)| EdgeDto {
                from: from.to_string(),
                to: to.to_string(),
                type_: "call".to_string(),
            })
            .collect();

        GraphDto { nodes, edges }
    }
}
