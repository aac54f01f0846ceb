use std::fs;
use tempfile::TempDir;

use esgdb_core::config::Config;
use esgdb_core::data_processor::{DataProcessor, SummaryRecord};
use esgdb_core::types::SectionType;

#[test]
fn rewritten_summary_wins_over_extractive() {
    let record = SummaryRecord {
        environment_summary_rewritten: Some("Rewritten climate text".into()),
        environment_summary_extractive: vec!["first".into(), "second".into()],
        social_summary_rewritten: Some(String::new()),
        social_summary_extractive: vec!["We train staff.".into(), "We hire locally.".into()],
        ..Default::default()
    };
    assert_eq!(record.section_text(SectionType::Env), "Rewritten climate text");
    assert_eq!(record.section_text(SectionType::Soc), "We train staff. We hire locally.");
    assert_eq!(record.section_text(SectionType::Gov), "");
}

#[test]
fn blank_sections_are_not_indexed() {
    let record = SummaryRecord {
        file: Some("acme_2023.json".into()),
        environment_summary_rewritten: Some("   ".into()),
        governance_summary_extractive: vec!["The board meets quarterly.".into()],
        ..Default::default()
    };
    let docs = record.to_documents("ignored.json");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].file_id, "acme_2023.json");
    assert_eq!(docs[0].section_type, SectionType::Gov);
}

#[test]
fn process_directory_reads_sorted_json_only() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("b_summary.json"), r#"{"social_summary_extractive": ["Community programs."]}"#).unwrap();
    fs::write(dir.join("a_summary.json"), r#"{"file": "a.txt", "environment_summary_rewritten": "Net zero by 2040."}"#).unwrap();
    fs::write(dir.join("notes.txt"), "not a record").unwrap();

    let docs = DataProcessor::new().process_directory(dir).expect("process");

    assert_eq!(docs.len(), 2);
    assert_eq!((docs[0].file_id.as_str(), docs[0].section_type), ("a.txt", SectionType::Env));
    // missing `file` key falls back to the record's file name
    assert_eq!((docs[1].file_id.as_str(), docs[1].section_type), ("b_summary.json", SectionType::Soc));
}

#[test]
fn process_files_reports_each_record_in_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("b_summary.json"), r#"{"governance_summary_rewritten": "Board oversight."}"#).unwrap();
    fs::write(dir.join("a_summary.json"), r#"{"environment_summary_extractive": ["Net zero.", "By 2040."]}"#).unwrap();

    let processor = DataProcessor::new();
    let files = processor.list_summary_files(dir).unwrap();
    let mut seen = Vec::new();
    let docs = processor
        .process_files(&files, |p| seen.push(p.file_name().unwrap().to_string_lossy().to_string()))
        .expect("process");

    assert_eq!(seen, vec!["a_summary.json", "b_summary.json"]);
    assert_eq!(docs, processor.process_directory(dir).unwrap());
    assert_eq!(docs[0].text, "Net zero. By 2040.");
}

#[test]
fn malformed_record_is_reported_with_path() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.json"), "{ not json").unwrap();
    let err = DataProcessor::new().process_directory(tmp.path()).expect_err("must fail");
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn config_file_overrides_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[search]\ntop_k = 7\n").unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[data]\nindex_path = \"idx/test.json\"\n").unwrap();

    let config = Config::load_from(tmp.path(), "test").expect("config");
    let settings = config.settings().expect("settings");

    assert_eq!(settings.search.top_k, 7);
    assert_eq!(settings.search.snippet_chars, 500);
    assert_eq!(settings.index_path(config.base_dir()), tmp.path().join("idx/test.json"));
    assert_eq!(config.get::<usize>("search.top_k").expect("key"), 7);
}

#[test]
fn invalid_config_is_rejected_at_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[classifier]\ndefault_intent = \"NOPE\"\n").unwrap();
    assert!(Config::load_from(tmp.path(), "dev").is_err());
}
