use crate::error::Result;
use crate::types::{QueryResult, SectionType};

/// Maps free text to an intent label. The label is returned raw; parsing it
/// into [`crate::types::Intent`] is the caller's job.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<String>;
}

pub trait SectionSearch: Send + Sync {
    fn search_section(
        &self,
        query: &str,
        allowed_sections: &[SectionType],
        top_k: usize,
        company_filter: Option<&str>,
    ) -> Result<Vec<QueryResult>>;
}
