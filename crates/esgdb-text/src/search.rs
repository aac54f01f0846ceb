use std::sync::Arc;
use std::time::{Duration, Instant};

use esgdb_core::error::{Error, Result};
use esgdb_core::traits::SectionSearch;
use esgdb_core::types::{QueryResult, SectionType};

use crate::index::{cosine, normalize_identity, CorpusIndex};

pub const DEFAULT_SNIPPET_CHARS: usize = 500;

/// Section-scoped retriever over a shared, read-only [`CorpusIndex`].
///
/// Ranking combines three filters: allowed section types, an optional company
/// scope matched against normalized file ids, and cosine similarity. When a
/// company scope yields candidates but none of them scores above zero, the
/// first candidate in index order is returned as a fallback hit.
#[derive(Clone)]
pub struct SectionRetriever {
	index: Arc<CorpusIndex>,
	snippet_chars: usize,
	budget: Option<Duration>,
}

impl SectionRetriever {
	pub fn new(index: Arc<CorpusIndex>) -> Self {
		Self { index, snippet_chars: DEFAULT_SNIPPET_CHARS, budget: None }
	}

	pub fn with_snippet_chars(mut self, chars: usize) -> Self { self.snippet_chars = chars; self }

	/// Queries exceeding `budget` are abandoned and return no results.
	pub fn with_budget(mut self, budget: Option<Duration>) -> Self { self.budget = budget; self }

	pub fn index(&self) -> &CorpusIndex { &self.index }

	pub fn retrieve(&self, boosted_query: &str, allowed_sections: &[SectionType], top_k: usize, company: Option<&str>) -> Result<Vec<QueryResult>> {
		if top_k == 0 { return Err(Error::InvalidArgument("top_k must be at least 1".into())); }
		let started = Instant::now();
		if allowed_sections.is_empty() || self.index.is_empty() { return Ok(vec![]); }

		let query_vec = self.index.project(boosted_query);
		if self.over_budget(started) { return Ok(vec![]); }

		let company_norm = company.map(normalize_identity).filter(|c| !c.is_empty());
		let mut candidates: Vec<(usize, f32)> = Vec::new();
		for (i, doc) in self.index.documents().iter().enumerate() {
			if !allowed_sections.contains(&doc.section_type) { continue; }
			if let Some(c) = &company_norm { if !self.index.normalized_id(i).contains(c.as_str()) { continue; } }
			candidates.push((i, cosine(&query_vec, self.index.vector(i))));
			if self.over_budget(started) { return Ok(vec![]); }
		}

		let first_candidate = candidates.first().map(|(i, _)| *i);
		// sort_by is stable: equal scores keep index order
		candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
		let results: Vec<QueryResult> = candidates
			.into_iter()
			.filter(|(_, score)| *score > 0.0)
			.take(top_k)
			.map(|(i, score)| self.to_result(i, score, false))
			.collect();
		if !results.is_empty() { return Ok(results); }

		match (&company_norm, first_candidate) {
			(Some(company), Some(i)) => {
				tracing::info!(company = %company, file = %self.index.documents()[i].file_id, "no lexical match; returning company fallback");
				Ok(vec![self.to_result(i, 0.0, true)])
			}
			_ => Ok(vec![]),
		}
	}

	fn to_result(&self, i: usize, score: f32, is_fallback: bool) -> QueryResult {
		let doc = &self.index.documents()[i];
		QueryResult {
			file_id: doc.file_id.clone(),
			section_type: doc.section_type,
			score,
			text_snippet: truncate_chars(&doc.text, self.snippet_chars),
			is_fallback,
		}
	}

	fn over_budget(&self, started: Instant) -> bool {
		match self.budget {
			Some(budget) if started.elapsed() > budget => {
				tracing::warn!(elapsed_ms = started.elapsed().as_millis() as u64, budget_ms = budget.as_millis() as u64, "query exceeded latency budget; abandoning");
				true
			}
			_ => false,
		}
	}
}

impl SectionSearch for SectionRetriever {
	fn search_section(&self, query: &str, allowed_sections: &[SectionType], top_k: usize, company_filter: Option<&str>) -> Result<Vec<QueryResult>> {
		self.retrieve(query, allowed_sections, top_k, company_filter)
	}
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
	text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn truncation_is_char_based_and_never_pads() {
		assert_eq!(truncate_chars("short", 500), "short");
		assert_eq!(truncate_chars("ééééé", 3), "ééé");
		assert_eq!(truncate_chars(&"x".repeat(800), 500).len(), 500);
	}

	#[test]
	fn zero_top_k_is_rejected() {
		let retriever = SectionRetriever::new(Arc::new(CorpusIndex::build(vec![])));
		assert!(matches!(retriever.retrieve("q", &[SectionType::Env], 0, None), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn exhausted_budget_yields_empty() {
		let index = CorpusIndex::build(vec![esgdb_core::types::SectionDocument {
			file_id: "acme".into(),
			section_type: SectionType::Env,
			text: "emissions".into(),
		}]);
		let retriever = SectionRetriever::new(Arc::new(index)).with_budget(Some(Duration::ZERO));
		assert!(retriever.retrieve("emissions", &[SectionType::Env], 3, None).expect("ok").is_empty());
	}
}
