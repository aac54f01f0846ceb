use esgdb_core::error::Result;
use esgdb_core::types::{Intent, SectionType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub intent: Intent,
    pub allowed_sections: Vec<SectionType>,
    pub boosted_query: String,
}

pub fn sections_for(intent: Intent) -> &'static [SectionType] {
    match intent {
        Intent::EnvTargets | Intent::EnvPolicies => &[SectionType::Env],
        Intent::SocPolicies | Intent::SocImpact => &[SectionType::Soc],
        Intent::GovStructure | Intent::GovCompliance => &[SectionType::Gov],
    }
}

pub fn boost_keywords(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::EnvTargets => &["emissions", "targets", "net zero"],
        Intent::EnvPolicies => &["climate", "policy", "renewable"],
        Intent::SocPolicies => &["employee", "diversity", "training"],
        Intent::SocImpact => &["community", "impact", "CSR"],
        Intent::GovStructure => &["board", "committee", "oversight"],
        Intent::GovCompliance => &["audit", "compliance", "ethics"],
    }
}

pub fn plan(query: &str, intent: Intent) -> QueryPlan {
    QueryPlan {
        intent,
        allowed_sections: sections_for(intent).to_vec(),
        boosted_query: format!("{} {}", query, boost_keywords(intent).join(" ")),
    }
}

/// Plans from a raw classifier label; labels outside the closed intent set
/// fail with a configuration error.
pub fn plan_label(query: &str, label: &str) -> Result<QueryPlan> {
    Ok(plan(query, label.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgdb_core::error::Error;

    #[test]
    fn env_targets_plan() {
        let p = plan("What are the company's net zero commitments?", Intent::EnvTargets);
        assert_eq!(p.allowed_sections, vec![SectionType::Env]);
        assert_eq!(p.boosted_query, "What are the company's net zero commitments? emissions targets net zero");
    }

    #[test]
    fn every_intent_has_sections_and_keywords() {
        for intent in Intent::ALL {
            assert!(!sections_for(intent).is_empty());
            assert!(!boost_keywords(intent).is_empty());
        }
    }

    #[test]
    fn unknown_label_is_configuration_error() {
        assert!(matches!(plan_label("q", "MARKETING"), Err(Error::Configuration(_))));
        assert_eq!(plan_label("q", "GOV_COMPLIANCE").expect("plan").boosted_query, "q audit compliance ethics");
    }
}
