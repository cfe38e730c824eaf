//! Call graph and hierarchy exporters (JSON, Graphviz DOT, plain text).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::dto::GraphDto;
use crate::domain::callgraph::CallGraph;
use crate::domain::hierarchy::ClassHierarchy;
use crate::errors::AnalysisError;
use crate::ports::{HierarchyExporter, OutputExporter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Dot,
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
            OutputFormat::Text => "txt",
        }
    }

    pub fn exporter(&self) -> Box<dyn OutputExporter> {
        match self {
            OutputFormat::Json => Box::new(JsonExporter),
            OutputFormat::Dot => Box::new(DotExporter),
            OutputFormat::Text => Box::new(TextExporter),
        }
    }

    /// Hierarchy views exist for JSON and DOT; text falls back to JSON.
    pub fn hierarchy_exporter(&self) -> Box<dyn HierarchyExporter> {
        match self {
            OutputFormat::Dot => Box::new(DotExporter),
            OutputFormat::Json | OutputFormat::Text => Box::new(JsonExporter),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "dot" => Ok(OutputFormat::Dot),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(AnalysisError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
            OutputFormat::Text => "text",
        })
    }
}

pub struct JsonExporter;

impl OutputExporter for JsonExporter {
    fn render(&self, cg: &CallGraph) -> String {
        // GraphDto holds only strings; serialization cannot fail
        serde_json::to_string_pretty(&GraphDto::from(cg)).unwrap_or_default()
    }
}

impl HierarchyExporter for JsonExporter {
    fn render_hierarchy(&self, hierarchy: &ClassHierarchy) -> String {
        serde_json::to_string_pretty(hierarchy).unwrap_or_default()
    }
}

pub struct DotExporter;

impl DotExporter {
    fn escape_label(label: &str) -> String {
        label
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}

impl OutputExporter for DotExporter {
    fn render(&self, cg: &CallGraph) -> String {
        let mut lines = Vec::new();

        lines.push("digraph CallGraph {".to_string());
        lines.push("    rankdir=LR;".to_string());
        lines.push("    node [shape=box, fontname=\"Helvetica\"];".to_string());
        lines.push("".to_string());

        for id in cg.nodes() {
            let label = Self::escape_label(&id.to_string());
            lines.push(format!("    \"{}\" [label=\"{}\"];", label, label));
        }

        lines.push("".to_string());

        for (from, to) in cg.edges() {
            lines.push(format!(
                "    \"{}\" -> \"{}\";",
                Self::escape_label(&from.to_string()),
                Self::escape_label(&to.to_string())
            ));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }
}

impl HierarchyExporter for DotExporter {
    /// Edges point from base to derived contract.
    fn render_hierarchy(&self, hierarchy: &ClassHierarchy) -> String {
        let mut lines = Vec::new();

        lines.push("digraph ClassHierarchy {".to_string());
        lines.push("    rankdir=TB;".to_string());
        lines.push("    node [shape=box, fontname=\"Helvetica\"];".to_string());
        lines.push("".to_string());

        for (contract, entry) in hierarchy.iter() {
            let name = Self::escape_label(contract);
            lines.push(format!("    \"{}\" [label=\"{}\"];", name, name));
            for base in &entry.base_contracts {
                lines.push(format!("    \"{}\" -> \"{}\";", Self::escape_label(base), name));
            }
        }

        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// One line per function: `A.f -> B.g, C.h`.
pub struct TextExporter;

impl OutputExporter for TextExporter {
    fn render(&self, cg: &CallGraph) -> String {
        cg.nodes()
            .into_iter()
            .map(|caller| {
                let mut callees: Vec<String> = cg
                    .callees(caller)
                    .into_iter()
                    .flatten()
                    .map(ToString::to_string)
                    .collect();
                callees.sort();
                if callees.is_empty() {
                    format!("{} -> (none)", caller)
                } else {
                    format!("{} -> {}", caller, callees.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
