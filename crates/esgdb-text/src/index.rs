use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tantivy::tokenizer::TextAnalyzer;

use esgdb_core::error::{Error, Result};
use esgdb_core::types::{SectionDocument, SectionType};

use crate::tantivy_utils::{analyze, build_analyzer};

/// Bumped whenever the on-disk layout changes; older artifacts must be rebuilt.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
	pub column: u32,
	pub idf: f32,
}

/// `(column, weight)` pairs sorted by column, L2-normalized.
pub type SparseVector = Vec<(u32, f32)>;

#[derive(Serialize, Deserialize)]
struct IndexArtifact {
	format_version: u32,
	vocabulary: BTreeMap<String, TermEntry>,
	document_vectors: Vec<SparseVector>,
	metadata: Vec<SectionDocument>,
}

/// Frozen tf-idf index over section documents.
///
/// `document_vectors[i]` always describes `metadata[i]`. Vocabulary columns
/// follow lexicographic term order, so iterating a term-sorted map yields
/// column-sorted sparse vectors.
pub struct CorpusIndex {
	vocabulary: BTreeMap<String, TermEntry>,
	document_vectors: Vec<SparseVector>,
	metadata: Vec<SectionDocument>,
	terms: Vec<String>,
	normalized_ids: Vec<String>,
	analyzer: TextAnalyzer,
}

impl CorpusIndex {
	pub fn build(documents: Vec<SectionDocument>) -> Self {
		let mut analyzer = build_analyzer();
		let term_counts: Vec<BTreeMap<String, u32>> = documents.iter().map(|d| count_terms(&mut analyzer, &d.text)).collect();

		let mut doc_freq: BTreeMap<&str, u32> = BTreeMap::new();
		for counts in &term_counts { for term in counts.keys() { *doc_freq.entry(term.as_str()).or_default() += 1; } }

		let n = documents.len() as f32;
		let vocabulary: BTreeMap<String, TermEntry> = doc_freq
			.into_iter()
			.enumerate()
			.map(|(column, (term, df))| (term.to_string(), TermEntry { column: column as u32, idf: ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0 }))
			.collect();
		let document_vectors = term_counts.iter().map(|counts| weigh(&vocabulary, counts)).collect();

		tracing::info!(documents = documents.len(), terms = vocabulary.len(), "built section index");
		Self::assemble(vocabulary, document_vectors, documents)
	}

	fn assemble(vocabulary: BTreeMap<String, TermEntry>, document_vectors: Vec<SparseVector>, metadata: Vec<SectionDocument>) -> Self {
		let terms = vocabulary.keys().cloned().collect();
		let normalized_ids = metadata.iter().map(|m| normalize_identity(&m.file_id)).collect();
		Self { vocabulary, document_vectors, metadata, terms, normalized_ids, analyzer: build_analyzer() }
	}

	/// Writes the index as one JSON artifact, replacing any previous one
	/// atomically via a sibling temp file.
	pub fn save(&self, path: &Path) -> Result<()> {
		let parent = match path.parent() { Some(p) if !p.as_os_str().is_empty() => p, _ => Path::new(".") };
		fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
		let artifact = IndexArtifact {
			format_version: FORMAT_VERSION,
			vocabulary: self.vocabulary.clone(),
			document_vectors: self.document_vectors.clone(),
			metadata: self.metadata.clone(),
		};
		let tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
		{
			let mut writer = BufWriter::new(tmp.as_file());
			serde_json::to_writer(&mut writer, &artifact).map_err(|e| Error::json(path, e))?;
			writer.flush().map_err(|e| Error::io(tmp.path(), e))?;
		}
		tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
		tracing::info!(path = %path.display(), documents = self.len(), "saved section index");
		Ok(())
	}

	pub fn load(path: &Path) -> Result<Self> {
		if !path.is_file() { return Err(Error::IndexNotBuilt(path.to_path_buf())); }
		let file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
		let artifact: IndexArtifact = serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::json(path, e))?;
		if artifact.format_version != FORMAT_VERSION {
			return Err(Error::Configuration(format!(
				"index at {} has format {} (expected {}); rebuild it", path.display(), artifact.format_version, FORMAT_VERSION
			)));
		}
		if artifact.document_vectors.len() != artifact.metadata.len() {
			return Err(Error::Configuration(format!("index at {} is inconsistent: {} vectors for {} documents", path.display(), artifact.document_vectors.len(), artifact.metadata.len())));
		}
		tracing::debug!(path = %path.display(), documents = artifact.metadata.len(), "loaded section index");
		Ok(Self::assemble(artifact.vocabulary, artifact.document_vectors, artifact.metadata))
	}

	/// Projects text onto the frozen vocabulary. Unknown terms are dropped.
	pub fn project(&self, text: &str) -> SparseVector {
		let mut analyzer = self.analyzer.clone();
		weigh(&self.vocabulary, &count_terms(&mut analyzer, text))
	}

	pub fn len(&self) -> usize { self.metadata.len() }
	pub fn is_empty(&self) -> bool { self.metadata.is_empty() }
	pub fn vocabulary_len(&self) -> usize { self.vocabulary.len() }
	pub fn documents(&self) -> &[SectionDocument] { &self.metadata }
	pub fn vector(&self, i: usize) -> &[(u32, f32)] { &self.document_vectors[i] }
	pub(crate) fn normalized_id(&self, i: usize) -> &str { &self.normalized_ids[i] }

	pub fn section_counts(&self) -> Vec<(SectionType, usize)> {
		SectionType::ALL.into_iter().map(|s| (s, self.metadata.iter().filter(|m| m.section_type == s).count())).collect()
	}

	/// Highest-weighted terms of document `i`; ties resolve in term order.
	pub fn key_phrases(&self, i: usize, n: usize) -> Vec<String> {
		let Some(vector) = self.document_vectors.get(i) else { return vec![] };
		let mut weighted: Vec<(u32, f32)> = vector.clone();
		weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
		weighted.into_iter().take(n).filter_map(|(column, _)| self.terms.get(column as usize).cloned()).collect()
	}
}

/// Lowercase, alphanumeric-only form used to match companies against file ids.
pub fn normalize_identity(s: &str) -> String {
	s.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

/// Cosine similarity clamped to `[0, 1]`; zero vectors score 0.
pub fn cosine(a: &[(u32, f32)], b: &[(u32, f32)]) -> f32 {
	let norm_a = a.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
	let norm_b = b.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
	if norm_a == 0.0 || norm_b == 0.0 { return 0.0; }
	let (mut i, mut j, mut dot) = (0usize, 0usize, 0.0f32);
	while i < a.len() && j < b.len() {
		match a[i].0.cmp(&b[j].0) {
			std::cmp::Ordering::Less => i += 1,
			std::cmp::Ordering::Greater => j += 1,
			std::cmp::Ordering::Equal => { dot += a[i].1 * b[j].1; i += 1; j += 1; }
		}
	}
	let sim = dot / (norm_a * norm_b);
	if sim.is_finite() { sim.clamp(0.0, 1.0) } else { 0.0 }
}

fn count_terms(analyzer: &mut TextAnalyzer, text: &str) -> BTreeMap<String, u32> {
	let mut counts = BTreeMap::new();
	for term in analyze(analyzer, text) { *counts.entry(term).or_insert(0) += 1; }
	counts
}

fn weigh(vocabulary: &BTreeMap<String, TermEntry>, counts: &BTreeMap<String, u32>) -> SparseVector {
	let mut vector: SparseVector = counts
		.iter()
		.filter_map(|(term, tf)| vocabulary.get(term).map(|e| (e.column, *tf as f32 * e.idf)))
		.collect();
	let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
	if norm > 0.0 { for (_, w) in &mut vector { *w /= norm; } }
	vector
}
