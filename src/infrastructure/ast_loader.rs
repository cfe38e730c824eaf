use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::ast::Ast;

/// Marker around a source file name in solc's textual output.
const BANNER_FENCE: &str = "=======";

pub struct AstLoader;

/// One JSON document of a solc output, with the source name from its banner.
#[derive(Debug, PartialEq)]
struct Section<'a> {
    source: Option<&'a str>,
    json: &'a str,
}

impl AstLoader {
    /// Load a compiler-emitted JSON AST (`solc --ast-compact-json`) from disk.
    ///
    /// solc writes one `======= file =======` banner per source followed by
    /// that source's JSON. Every section is parsed and the source units are
    /// combined, so contracts from all files are analyzed together.
    pub fn load_file(path: &Path) -> Result<Ast> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read AST file {}", path.display()))?;
        Self::load_str(&content).with_context(|| format!("Invalid AST document {}", path.display()))
    }

    pub fn load_str(content: &str) -> Result<Ast> {
        let sections = split_sections(content);
        anyhow::ensure!(!sections.is_empty(), "No JSON object found");

        let mut units = Vec::with_capacity(sections.len());
        for section in &sections {
            let unit = Ast::from_json_str(section.json)
                .with_context(|| format!("Invalid AST for source {}", section.source.unwrap_or("<unnamed>")))?;
            units.push(unit);
        }

        let ast = Ast::combine(units);
        tracing::debug!(sources = sections.len(), top_level = ast.top_level().count(), "loaded AST");
        Ok(ast)
    }
}

fn banner_source(line: &str) -> Option<&str> {
    let name = line
        .trim()
        .strip_prefix(BANNER_FENCE)?
        .strip_suffix(BANNER_FENCE)?
        .trim();
    (!name.is_empty()).then_some(name)
}

/// Split on banner lines. Text without a `{` (solc's header, blank lines)
/// is not a section; within a section, everything before the first `{` is
/// skipped.
fn split_sections<'a>(content: &'a str) -> Vec<Section<'a>> {
    let mut sections = Vec::new();
    let mut push = |source: Option<&'a str>, body: &'a str| {
        if let Some(start) = body.find('{') {
            sections.push(Section {
                source,
                json: &body[start..],
            });
        }
    };

    let mut source = None;
    let mut start = 0;
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if let Some(name) = banner_source(line) {
            push(source, &content[start..offset]);
            source = Some(name);
            start = offset + line.len();
        }
        offset += line.len();
    }
    push(source, &content[start..]);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hierarchy::build_class_hierarchy;
    use crate::ChaEngine;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_plain_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "nodeType": "SourceUnit", "nodes": [] }}"#).unwrap();
        let ast = AstLoader::load_file(file.path()).unwrap();
        assert_eq!(ast.top_level().count(), 0);
    }

    #[test]
    fn test_load_with_banner() {
        let content = "JSON AST (compact format):\n\n======= example.sol =======\n{\"nodes\": []}\n";
        assert!(AstLoader::load_str(content).is_ok());
    }

    #[test]
    fn test_split_sections() {
        let content = "JSON AST (compact format):\n\n======= a.sol =======\n{\"nodes\": []}\n\n======= lib/b.sol =======\n{\"nodes\": [1]}\n";
        assert_eq!(
            split_sections(content),
            vec![
                Section { source: Some("a.sol"), json: "{\"nodes\": []}\n\n" },
                Section { source: Some("lib/b.sol"), json: "{\"nodes\": [1]}\n" },
            ]
        );
        assert_eq!(banner_source("======= ======="), None);
        assert_eq!(banner_source("{\"nodes\": []}"), None);
    }

    #[test]
    fn test_multiple_sources_are_combined() {
        let content = concat!(
            "JSON AST (compact format):\n\n",
            "======= Base.sol =======\n",
            r#"{"nodeType":"SourceUnit","nodes":[{"nodeType":"ContractDefinition","name":"Base","baseContracts":[],"nodes":[{"nodeType":"FunctionDefinition","name":"ping","kind":"function"}]}]}"#,
            "\n\n======= Child.sol =======\n",
            r#"{"nodeType":"SourceUnit","nodes":[{"nodeType":"ContractDefinition","name":"Child","baseContracts":[{"nodeType":"InheritanceSpecifier","baseName":{"name":"Base"}}],"nodes":[{"nodeType":"FunctionDefinition","name":"run","kind":"function","body":{"nodeType":"Block","statements":[{"nodeType":"FunctionCall","expression":{"nodeType":"Identifier","name":"ping"}}]}}]}]}"#,
            "\n"
        );

        let ast = AstLoader::load_str(content).unwrap();
        let hierarchy = build_class_hierarchy(&ast);
        assert_eq!(hierarchy.len(), 2);
        assert_eq!(hierarchy.get("Child").unwrap().base_contracts, vec!["Base"]);

        let cg = ChaEngine::new().analyze(&ast);
        assert!(cg.contains_edge(&"Child.run".parse().unwrap(), &"Base.ping".parse().unwrap()));
    }

    #[test]
    fn test_bad_section_names_its_source() {
        let content = "======= ok.sol =======\n{\"nodes\": []}\n======= broken.sol =======\n{\"nodes\": \n";
        let err = AstLoader::load_str(content).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.sol"));
    }

    #[test]
    fn test_load_errors() {
        assert!(AstLoader::load_file(Path::new("/definitely/not/here.ast")).is_err());
        assert!(AstLoader::load_str("no json here").is_err());
        let err = AstLoader::load_str(r#"{"nodeType": "SourceUnit"}"#).unwrap_err();
        assert!(format!("{:#}", err).contains("Malformed AST"));
    }
}
