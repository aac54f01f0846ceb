use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{SectionDocument, SectionType};

/// Per-report summary record as written by the summarization stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryRecord {
    pub file: Option<String>,
    pub environment_summary_rewritten: Option<String>,
    pub environment_summary_extractive: Vec<String>,
    pub social_summary_rewritten: Option<String>,
    pub social_summary_extractive: Vec<String>,
    pub governance_summary_rewritten: Option<String>,
    pub governance_summary_extractive: Vec<String>,
}

impl SummaryRecord {
    /// Rewritten summary if present and non-empty, else the extractive
    /// sentences joined by spaces. May be empty.
    pub fn section_text(&self, section: SectionType) -> String {
        let (rewritten, extractive) = match section {
            SectionType::Env => (&self.environment_summary_rewritten, &self.environment_summary_extractive),
            SectionType::Soc => (&self.social_summary_rewritten, &self.social_summary_extractive),
            SectionType::Gov => (&self.governance_summary_rewritten, &self.governance_summary_extractive),
        };
        match rewritten {
            Some(text) if !text.is_empty() => text.clone(),
            _ => extractive.join(" "),
        }
    }

    /// Section documents in ENV, SOC, GOV order; blank sections are skipped.
    pub fn to_documents(&self, fallback_id: &str) -> Vec<SectionDocument> {
        let file_id = self.file.clone().unwrap_or_else(|| fallback_id.to_string());
        SectionType::ALL
            .into_iter()
            .filter_map(|section_type| {
                let text = self.section_text(section_type);
                if text.trim().is_empty() {
                    return None;
                }
                Some(SectionDocument { file_id: file_id.clone(), section_type, text })
            })
            .collect()
    }
}

#[derive(Default)]
pub struct DataProcessor;

impl DataProcessor {
    pub fn new() -> Self { Self }

    /// Reads every `*.json` summary record directly under `dir` (sorted by
    /// path) and flattens them into section documents.
    pub fn process_directory(&self, dir: &Path) -> Result<Vec<SectionDocument>> {
        let files = self.list_summary_files(dir)?;
        if files.is_empty() {
            tracing::warn!(dir = %dir.display(), "no summary records found");
        }
        self.process_files(&files, |_| {})
    }

    /// Flattens `files` in the given order, calling `on_record` after each
    /// record is read.
    pub fn process_files<F>(&self, files: &[PathBuf], mut on_record: F) -> Result<Vec<SectionDocument>>
    where
        F: FnMut(&Path),
    {
        let mut documents = Vec::new();
        for path in files {
            documents.extend(self.documents_from_file(path)?);
            on_record(path);
        }
        tracing::info!(files = files.len(), documents = documents.len(), "processed summary records");
        Ok(documents)
    }

    pub fn documents_from_file(&self, path: &Path) -> Result<Vec<SectionDocument>> {
        let record = self.read_record(path)?;
        Ok(record.to_documents(&self.file_name(path)))
    }

    pub fn read_record(&self, path: &Path) -> Result<SummaryRecord> {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&raw).map_err(|e| Error::json(path, e))
    }

    pub fn list_summary_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(Error::io(root, std::io::Error::new(std::io::ErrorKind::NotFound, "summaries directory missing")));
        }
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(root).max_depth(1).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") { files.push(path.to_path_buf()); }
        }
        files.sort();
        Ok(files)
    }

    fn file_name(&self, path: &Path) -> String {
        path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
    }
}
