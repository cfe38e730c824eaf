//! Run configuration.
//!
//! Read from `sol-callgraph.toml` (or an explicit path). Every key is
//! optional; command-line flags override whatever the file sets.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::algorithm::Algorithm;
use crate::errors::{AnalysisError, Result};
use crate::infrastructure::engine::EngineOptions;
use crate::infrastructure::exporter::OutputFormat;

pub const DEFAULT_CONFIG_FILE: &str = "sol-callgraph.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Algorithms to run, in order.
    pub algorithms: Vec<Algorithm>,
    pub format: OutputFormat,
    pub parallel: bool,
    /// Worker threads when `parallel` is set.
    pub jobs: Option<usize>,
    /// tracing filter used when `RUST_LOG` is unset.
    pub log: String,
    /// Also emit the class hierarchy.
    pub hierarchy: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            format: OutputFormat::Json,
            parallel: false,
            jobs: None,
            log: "info".to_string(),
            hierarchy: false,
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: AnalysisConfig =
            toml::from_str(src).map_err(|e| AnalysisError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let src = fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    pub fn validate(&self) -> Result<()> {
        if self.algorithms.is_empty() {
            return Err(AnalysisError::config("`algorithms` must name at least one algorithm"));
        }
        if self.jobs == Some(0) {
            return Err(AnalysisError::config("`jobs` must be at least 1"));
        }
        Ok(())
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            parallel: self.parallel,
        }
    }
}
