//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`
//! and `ESGDB_*` env vars (`__` separates nested keys, e.g.
//! `ESGDB_SEARCH__TOP_K=5`). Provides helpers to expand `~` and `${VAR}` and to
//! resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Intent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
    pub classifier: ClassifierSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    pub summaries_dir: String,
    pub index_path: String,
    pub companies_path: String,
    pub aliases_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub top_k: usize,
    pub snippet_chars: usize,
    /// Per-query budget; unset means unbounded.
    pub max_query_millis: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    pub default_intent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings {
                summaries_dir: "data/summaries".to_string(),
                index_path: "data/index_sections/section_index.json".to_string(),
                companies_path: "data/companies.txt".to_string(),
                aliases_path: "data/company_aliases.json".to_string(),
            },
            search: SearchSettings { top_k: 3, snippet_chars: 500, max_query_millis: None },
            classifier: ClassifierSettings { default_intent: Intent::EnvTargets.label().to_string() },
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.search.top_k == 0 {
            return Err(Error::Configuration("search.top_k must be at least 1".into()));
        }
        if self.search.snippet_chars == 0 {
            return Err(Error::Configuration("search.snippet_chars must be at least 1".into()));
        }
        self.default_intent()?;
        Ok(())
    }

    pub fn default_intent(&self) -> Result<Intent> {
        self.classifier.default_intent.parse()
    }

    pub fn summaries_dir(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.data.summaries_dir) }
    pub fn index_path(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.data.index_path) }
    pub fn companies_path(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.data.companies_path) }
    pub fn aliases_path(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.data.aliases_path) }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Loads from the current directory using `RUST_ENV` (default `dev`).
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        let base = env::current_dir().map_err(|e| Error::io(".", e))?;
        Self::load_from(&base, &env_name)
    }

    pub fn load_from(base: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            other => tracing::debug!(env = other, "no environment overlay for this RUST_ENV"),
        }
        figment = figment.merge(Env::prefixed("ESGDB_").split("__"));

        let config = Self { figment, base_dir: base.to_path_buf() };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::Configuration(format!("Failed to get '{key}': {e}")))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::Configuration(e.to_string()))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
