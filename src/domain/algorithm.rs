//! Algorithm Domain Module
//!
//! The call graph construction algorithms the engines implement.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Class Hierarchy Analysis.
    Cha,
    /// Rapid Type Analysis.
    Rta,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Cha, Algorithm::Rta];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Cha => "CHA",
            Algorithm::Rta => "RTA",
        }
    }

    /// File stem used when writing one output per algorithm.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Algorithm::Cha => "call-graph-cha",
            Algorithm::Rta => "call-graph-rta",
        }
    }
}

impl FromStr for Algorithm {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cha" => Ok(Algorithm::Cha),
            "rta" => Ok(Algorithm::Rta),
            _ => Err(AnalysisError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
