//! Company detection over free-text queries.
//!
//! Matching is case-insensitive substring containment with first-match-wins
//! over ordered tables: aliases first (file order), then canonical names.
//! It is not longest-match; an alias listed earlier beats a longer one
//! listed later.

use std::fs;
use std::path::Path;

use esgdb_core::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct CompanyResolver {
    /// `(lowercased alias, canonical name)` in file order.
    aliases: Vec<(String, String)>,
    companies: Vec<String>,
}

impl CompanyResolver {
    pub fn new<A, C>(aliases: A, companies: C) -> Self
    where
        A: IntoIterator<Item = (String, String)>,
        C: IntoIterator<Item = String>,
    {
        let aliases = aliases
            .into_iter()
            .filter(|(alias, _)| !alias.is_empty())
            .map(|(alias, canonical)| (alias.to_lowercase(), canonical))
            .collect();
        let companies = companies.into_iter().filter(|c| !c.is_empty()).collect();
        Self { aliases, companies }
    }

    /// Loads both tables. A missing file is an empty table, not an error.
    pub fn load(companies_path: &Path, aliases_path: &Path) -> Result<Self> {
        let companies = load_companies(companies_path)?;
        let aliases = load_aliases(aliases_path)?;
        tracing::debug!(companies = companies.len(), aliases = aliases.len(), "loaded company tables");
        Ok(Self::new(aliases, companies))
    }

    pub fn resolve(&self, query: &str) -> Option<String> {
        let q = query.to_lowercase();
        if let Some((_, canonical)) = self.aliases.iter().find(|(alias, _)| q.contains(alias.as_str())) {
            return Some(canonical.clone());
        }
        self.companies.iter().find(|c| q.contains(&c.to_lowercase())).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.companies.is_empty()
    }
}

/// One company per line; blank lines are skipped.
pub fn load_companies(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "company list missing; using empty table");
        return Ok(vec![]);
    }
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(raw.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
}

/// JSON object `{ "alias": "Canonical Name", ... }`, read in file order.
pub fn load_aliases(path: &Path) -> Result<Vec<(String, String)>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "alias table missing; using empty table");
        return Ok(vec![]);
    }
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let table: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw).map_err(|e| Error::json(path, e))?;
    table
        .into_iter()
        .map(|(alias, canonical)| match canonical {
            serde_json::Value::String(name) => Ok((alias, name)),
            other => Err(Error::Configuration(format!("alias '{alias}' in {} maps to non-string {other}", path.display()))),
        })
        .collect()
}
