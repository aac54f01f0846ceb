use std::fs;

use esgdb_cli::{build_index, default_classifier, open_resolver, open_retriever};
use esgdb_core::config::Settings;
use esgdb_core::error::Error;
use esgdb_core::types::SectionType;
use esgdb_query::Orchestrator;
use tempfile::TempDir;

fn seed(tmp: &TempDir) -> Settings {
    let summaries = tmp.path().join("summaries");
    fs::create_dir_all(&summaries).unwrap();
    fs::write(
        summaries.join("acme_holdings_2023_summary.json"),
        r#"{
            "file": "Acme_Holdings_Ltd_2023.txt",
            "environment_summary_rewritten": "Acme targets net zero emissions by 2040.",
            "social_summary_extractive": ["Employee training reached every site.", "Diversity hiring improved."],
            "governance_summary_extractive": []
        }"#,
    )
    .unwrap();
    fs::write(
        summaries.join("globex_2023_summary.json"),
        r#"{
            "file": "Globex_2023.txt",
            "environment_summary_extractive": ["Renewable electricity covers half of demand."],
            "governance_summary_rewritten": "The board oversight committee reviews climate risk."
        }"#,
    )
    .unwrap();
    fs::write(tmp.path().join("company_aliases.json"), r#"{"acme": "Acme Holdings Ltd"}"#).unwrap();

    let mut settings = Settings::default();
    settings.data.summaries_dir = "summaries".into();
    settings.data.index_path = "index/section_index.json".into();
    settings.data.companies_path = "companies.txt".into();
    settings.data.aliases_path = "company_aliases.json".into();
    settings
}

#[test]
fn build_then_ask_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let settings = seed(&tmp);
    let base = tmp.path();

    let index = build_index(&settings.summaries_dir(base), &settings.index_path(base), false).expect("build");
    assert_eq!(index.len(), 4);

    let orchestrator = Orchestrator::new(
        default_classifier(&settings).unwrap(),
        open_retriever(&settings, base).expect("retriever"),
        open_resolver(&settings, base).expect("resolver"),
        settings.search.top_k,
    );
    let response = orchestrator.ask("What are Acme's net zero commitments?").expect("ask");
    assert_eq!(response.company, "Acme Holdings Ltd");
    assert_eq!(response.section_lookup, vec![SectionType::Env]);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].file_id, "Acme_Holdings_Ltd_2023.txt");
    assert!(!response.results[0].is_fallback);
}

#[test]
fn rebuild_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let settings = seed(&tmp);
    let base = tmp.path();
    let pairs = |i: &esgdb_text::CorpusIndex| i.documents().iter().map(|d| (d.file_id.clone(), d.section_type)).collect::<Vec<_>>();

    let first = build_index(&settings.summaries_dir(base), &settings.index_path(base), false).unwrap();
    let second = build_index(&settings.summaries_dir(base), &settings.index_path(base), false).unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(pairs(&first), pairs(&second));
    assert_eq!(
        pairs(&first),
        vec![
            ("Acme_Holdings_Ltd_2023.txt".to_string(), SectionType::Env),
            ("Acme_Holdings_Ltd_2023.txt".to_string(), SectionType::Soc),
            ("Globex_2023.txt".to_string(), SectionType::Env),
            ("Globex_2023.txt".to_string(), SectionType::Gov),
        ]
    );
}

#[test]
fn querying_before_build_fails_with_index_not_built() {
    let tmp = TempDir::new().unwrap();
    let settings = seed(&tmp);
    let err = open_retriever(&settings, tmp.path()).err().expect("must fail");
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::IndexNotBuilt(_))));
}

#[test]
fn missing_company_tables_open_an_empty_resolver() {
    let tmp = TempDir::new().unwrap();
    let settings = seed(&tmp);
    fs::remove_file(tmp.path().join("company_aliases.json")).unwrap();

    let resolver = open_resolver(&settings, tmp.path()).expect("resolver");
    assert!(resolver.is_empty());
    assert_eq!(resolver.resolve("What are Acme's targets?"), None);
}
