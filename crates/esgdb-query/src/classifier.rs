use esgdb_core::error::Result;
use esgdb_core::traits::IntentClassifier;
use esgdb_core::types::Intent;

/// Lowercase substrings that vote for an intent. Stems like "emission" also
/// catch plurals.
fn cues(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::EnvTargets => &["target", "net zero", "net-zero", "emission", "reduction", "goal", "commitment", "carbon neutral", "scope 1", "scope 2", "scope 3"],
        Intent::EnvPolicies => &["climate", "policy", "policies", "renewable", "energy", "environmental", "waste", "water", "biodiversity"],
        Intent::SocPolicies => &["employee", "diversity", "training", "inclusion", "health", "safety", "wellbeing", "workforce", "human rights"],
        Intent::SocImpact => &["community", "communities", "impact", "csr", "philanthrop", "volunteer", "donation", "charit"],
        Intent::GovStructure => &["board", "committee", "oversight", "director", "governance", "chair", "independent"],
        Intent::GovCompliance => &["audit", "compliance", "ethic", "bribery", "corruption", "whistleblow", "risk management", "code of conduct"],
    }
}

/// Deterministic cue-counting classifier. The intent with the most cue hits
/// wins; ties go to the earlier intent in [`Intent::ALL`]; no hits yields the
/// configured default.
#[derive(Debug, Clone)]
pub struct KeywordIntentClassifier {
    default_intent: Intent,
}

impl KeywordIntentClassifier {
    pub fn new(default_intent: Intent) -> Self {
        Self { default_intent }
    }

    pub fn predict(&self, text: &str) -> Intent {
        let lower = text.to_lowercase();
        let mut best = (self.default_intent, 0usize);
        for intent in Intent::ALL {
            let hits = cues(intent).iter().filter(|cue| lower.contains(*cue)).count();
            if hits > best.1 { best = (intent, hits); }
        }
        tracing::debug!(intent = %best.0, hits = best.1, "classified query");
        best.0
    }
}

impl Default for KeywordIntentClassifier {
    fn default() -> Self {
        Self::new(Intent::EnvTargets)
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn classify(&self, text: &str) -> Result<String> {
        Ok(self.predict(text).label().to_string())
    }
}

/// Returns the same label for every query; used when the caller already
/// knows the intent.
#[derive(Debug, Clone)]
pub struct FixedIntentClassifier(pub String);

impl IntentClassifier for FixedIntentClassifier {
    fn classify(&self, _text: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_intent_with_most_cues() {
        let c = KeywordIntentClassifier::default();
        assert_eq!(c.predict("What are the company's net zero commitments?"), Intent::EnvTargets);
        assert_eq!(c.predict("Who sits on the board audit committee?"), Intent::GovStructure);
        assert_eq!(c.predict("Anti-bribery and whistleblower compliance"), Intent::GovCompliance);
        assert_eq!(c.predict("employee diversity and inclusion training"), Intent::SocPolicies);
        assert_eq!(c.predict("community volunteer programs"), Intent::SocImpact);
    }

    #[test]
    fn no_cues_fall_back_to_default() {
        let c = KeywordIntentClassifier::new(Intent::GovStructure);
        assert_eq!(c.predict("tell me something"), Intent::GovStructure);
    }

    #[test]
    fn fixed_classifier_passes_label_through() {
        assert_eq!(FixedIntentClassifier("BOGUS".into()).classify("x").expect("label"), "BOGUS");
    }
}
