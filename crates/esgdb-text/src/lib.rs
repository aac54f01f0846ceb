//! esgdb-text
//!
//! Section-level tf-idf index (built with tantivy's analyzer pipeline) and the
//! section-scoped retriever that ranks it.

pub mod tantivy_utils;
pub mod index;
pub mod search;

pub use index::CorpusIndex;
pub use search::SectionRetriever;
