//! esgdb-query
//!
//! Query-side pipeline: classify intent, plan sections and boost terms,
//! resolve the company scope, then delegate ranking to a [`SectionSearch`].

pub mod classifier;
pub mod planner;
pub mod resolver;

use esgdb_core::error::Result;
use esgdb_core::traits::{IntentClassifier, SectionSearch};
use esgdb_core::types::{Response, GLOBAL_SCOPE};

pub use classifier::{FixedIntentClassifier, KeywordIntentClassifier};
pub use planner::QueryPlan;
pub use resolver::CompanyResolver;

pub struct Orchestrator<C, S> where C: IntentClassifier, S: SectionSearch {
    classifier: C,
    search: S,
    resolver: CompanyResolver,
    top_k: usize,
}

impl<C, S> Orchestrator<C, S> where C: IntentClassifier, S: SectionSearch {
    pub fn new(classifier: C, search: S, resolver: CompanyResolver, top_k: usize) -> Self {
        Self { classifier, search, resolver, top_k }
    }

    /// Errors from any collaborator propagate unchanged.
    pub fn ask(&self, query: &str) -> Result<Response> {
        let label = self.classifier.classify(query)?;
        let plan = planner::plan_label(query, &label)?;
        // company detection runs on the raw query, not the boosted one
        let company = self.resolver.resolve(query);
        match &company {
            Some(name) => tracing::info!(company = %name, "company detected"),
            None => tracing::info!("no company specified; using global search"),
        }
        let results = self.search.search_section(&plan.boosted_query, &plan.allowed_sections, self.top_k, company.as_deref())?;
        Ok(Response {
            query: query.to_string(),
            intent: plan.intent,
            section_lookup: plan.allowed_sections,
            company: company.unwrap_or_else(|| GLOBAL_SCOPE.to_string()),
            results,
        })
    }
}
