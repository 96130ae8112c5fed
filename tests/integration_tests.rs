//! Integration tests for the resume matcher

use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::dashboard::{DashboardHistory, DashboardSummary, ReportStore};
use resume_matcher::input::file_detector::DocumentRole;
use resume_matcher::input::manager::{InputManager, InputSource};
use resume_matcher::output::formatter::ReportGenerator;
use resume_matcher::output::report::AnalysisReport;
use resume_matcher::processing::matcher::MatchType;
use resume_matcher::{MatcherError, MatchingEngine};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

async fn load_fixture(name: &str, role: DocumentRole) -> String {
    let mut manager = InputManager::new();
    manager
        .extract_text(&Path::new("tests/fixtures").join(name), role)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let text = load_fixture("sample_resume.txt", DocumentRole::Resume).await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let text = load_fixture("sample_resume.md", DocumentRole::Resume).await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path, DocumentRole::Resume).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path, DocumentRole::Resume).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path, DocumentRole::Resume).await;
    assert!(matches!(result, Err(MatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let source = InputSource::File(PathBuf::from("tests/fixtures/missing.txt"));

    let result = manager.load(&source, DocumentRole::JobDescription).await;
    assert!(matches!(result, Err(MatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_fixture_analysis() {
    let resume = load_fixture("sample_resume.txt", DocumentRole::Resume).await;
    let job = load_fixture("sample_job.txt", DocumentRole::JobDescription).await;

    let outcome = MatchingEngine::new().analyze(&resume, &job);

    for skill in ["python", "django", "docker", "aws"] {
        let entry = &outcome.matched_keywords[skill];
        assert_eq!(entry.match_type, MatchType::Exact, "{} should match exactly", skill);
        assert_eq!(entry.similarity, 1.0);
    }

    let sql = &outcome.matched_keywords["sql"];
    assert_eq!(sql.match_type, MatchType::Partial);
    assert_eq!(sql.resume_keyword, "postgresql");
    assert!((sql.similarity - 0.3).abs() < 1e-9);

    assert!(outcome.missing_keywords.contains(&"kubernetes".to_string()));
    assert!(outcome.missing_keywords.contains(&"terraform".to_string()));
    assert!(outcome.extra_keywords.contains(&"react".to_string()));

    assert!(outcome.match_score > 0.0 && outcome.match_score < 100.0);
    assert!(outcome.explanation.starts_with("Match Score:"));
}

#[tokio::test]
async fn test_markdown_resume_matches_like_text() {
    let job = load_fixture("sample_job.txt", DocumentRole::JobDescription).await;
    let engine = MatchingEngine::new();

    let from_txt = engine.analyze(&load_fixture("sample_resume.txt", DocumentRole::Resume).await, &job);
    let from_md = engine.analyze(&load_fixture("sample_resume.md", DocumentRole::Resume).await, &job);

    for skill in ["python", "django", "docker", "aws", "sql"] {
        assert_eq!(
            from_txt.matched_keywords[skill].match_type,
            from_md.matched_keywords[skill].match_type
        );
    }
}

#[tokio::test]
async fn test_inline_job_text() {
    let resume = load_fixture("sample_resume.txt", DocumentRole::Resume).await;
    let mut manager = InputManager::new();
    let job = manager
        .load(
            &InputSource::Inline("Rust and Python engineer".to_string()),
            DocumentRole::JobDescription,
        )
        .await
        .unwrap();

    let outcome = MatchingEngine::new().analyze(&resume, &job);
    assert!(outcome.matched_keywords.contains_key("rust"));
    assert!(outcome.matched_keywords.contains_key("python"));
}

#[tokio::test]
async fn test_configured_engine_limits_keywords() {
    let mut config = Config::default();
    config.engine.max_keywords = 3;
    config.engine.additional_stop_words = vec!["backend".to_string()];

    let engine = MatchingEngine::from_config(&config.engine, &config.scoring, config.output.explanation_limit);
    let job = load_fixture("sample_job.txt", DocumentRole::JobDescription).await;
    let outcome = engine.analyze("python", &job);

    assert_eq!(outcome.job_keyword_count, 3);
    assert!(!outcome.missing_keywords.contains(&"backend".to_string()));
}

#[tokio::test]
async fn test_recorded_reports_feed_dashboard() {
    let dir = TempDir::new().unwrap();
    let store = ReportStore::new(dir.path());
    let engine = MatchingEngine::new();
    let job = load_fixture("sample_job.txt", DocumentRole::JobDescription).await;

    let strong = AnalysisReport::new(engine.analyze(&job, &job), "job-as-resume", "sample_job.txt");
    let partial = AnalysisReport::new(
        engine.analyze(&load_fixture("sample_resume.txt", DocumentRole::Resume).await, &job),
        "sample_resume.txt",
        "sample_job.txt",
    );
    store.save(&strong).await.unwrap();
    store.save(&partial).await.unwrap();

    let reports = store.load_all().await.unwrap();
    assert_eq!(reports.len(), 2);

    let summary = DashboardSummary::from_reports(&reports, 5);
    assert_eq!(summary.total_analyses, 2);
    assert_eq!(summary.highest_match_score, 100.0);
    assert!(summary.lowest_match_score < 100.0);
    assert!(summary
        .most_common_missing_skills
        .iter()
        .any(|stat| stat.skill == "kubernetes"));

    let history = DashboardHistory::from_reports(&reports, 0, 1);
    assert_eq!(history.total, 2);
    assert_eq!(history.analyses.len(), 1);
}

#[tokio::test]
async fn test_report_formats() {
    let resume = load_fixture("sample_resume.md", DocumentRole::Resume).await;
    let job = load_fixture("sample_job.txt", DocumentRole::JobDescription).await;
    let report = AnalysisReport::new(MatchingEngine::new().analyze(&resume, &job), "sample_resume.md", "sample_job.txt");
    let generator = ReportGenerator::with_options(false, true, true, true, true);

    let console = generator.generate_report(&report, OutputFormat::Console).unwrap();
    assert!(console.contains("RESUME MATCH ANALYSIS"));

    let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.outcome.missing_keywords, report.outcome.missing_keywords);

    let markdown = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("## ✅ Matched Skills"));

    let html = generator.generate_report(&report, OutputFormat::Html).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("terraform"));
}
