//! Domain types shared by the indexer, the retriever and the query layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// ESG disclosure category a section document is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SectionType {
    Env,
    Soc,
    Gov,
}

impl SectionType {
    /// Indexing order within a single summary record.
    pub const ALL: [SectionType; 3] = [SectionType::Env, SectionType::Soc, SectionType::Gov];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Env => "ENV",
            SectionType::Soc => "SOC",
            SectionType::Gov => "GOV",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENV" => Ok(SectionType::Env),
            "SOC" => Ok(SectionType::Soc),
            "GOV" => Ok(SectionType::Gov),
            other => Err(Error::InvalidArgument(format!("unknown section type '{other}'"))),
        }
    }
}

/// Classified purpose of a user query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    EnvTargets,
    EnvPolicies,
    SocPolicies,
    SocImpact,
    GovStructure,
    GovCompliance,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::EnvTargets,
        Intent::EnvPolicies,
        Intent::SocPolicies,
        Intent::SocImpact,
        Intent::GovStructure,
        Intent::GovCompliance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Intent::EnvTargets => "ENV_TARGETS",
            Intent::EnvPolicies => "ENV_POLICIES",
            Intent::SocPolicies => "SOC_POLICIES",
            Intent::SocImpact => "SOC_IMPACT",
            Intent::GovStructure => "GOV_STRUCTURE",
            Intent::GovCompliance => "GOV_COMPLIANCE",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a classifier label. Anything outside the closed set is a
/// configuration error, never a silent default.
impl FromStr for Intent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.label() == s.trim())
            .ok_or_else(|| Error::Configuration(format!("unknown intent label '{s}'")))
    }
}

/// One indexed unit: the summary text of a single ESG section of one report.
///
/// `text` is never empty after trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDocument {
    pub file_id: String,
    pub section_type: SectionType,
    pub text: String,
}

/// A ranked hit returned by the retriever.
///
/// `score` lies in `[0, 1]`; fallback hits always carry `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "file")]
    pub file_id: String,
    #[serde(rename = "section")]
    pub section_type: SectionType,
    pub score: f32,
    #[serde(rename = "text")]
    pub text_snippet: String,
    pub is_fallback: bool,
}

/// Response envelope produced by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub query: String,
    pub intent: Intent,
    pub section_lookup: Vec<SectionType>,
    pub company: String,
    pub results: Vec<QueryResult>,
}

/// Company scope label used when no company was detected.
pub const GLOBAL_SCOPE: &str = "GLOBAL";
