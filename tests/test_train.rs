mod common;

use alumni_match::domain::entities::profile::UserRecord;
use alumni_match::domain::error::DomainError;
use alumni_match::domain::ports::profile_source::ProfileSource;
use alumni_match::infrastructure::sources::json_file::JsonFileSource;
use alumni_match::AlumniMatch;
use common::{alumnus, query, setup, student, three_alumni};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Serves the Alice/Bob/Carol corpus until switched into failure mode.
struct FlakySource {
    broken: AtomicBool,
}

#[async_trait::async_trait]
impl ProfileSource for FlakySource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(DomainError::DataSource("connection refused".into()));
        }
        Ok(three_alumni())
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

#[tokio::test]
async fn test_students_are_excluded() {
    let mut users = three_alumni();
    users.push(student("s", "Sam", "python"));
    let (am, _) = setup(users);

    let report = am.train().await.unwrap();
    assert_eq!(report.users_fetched, 4);
    assert_eq!(report.alumni, 3);
    assert_eq!(report.vocabulary_size, 3);

    let recs = am.recommend(&query("python", "", ""), 10).unwrap();
    assert!(recs.iter().all(|r| r.name != "Sam"));
}

#[tokio::test]
async fn test_source_failure_propagates_and_keeps_model() {
    let source = Arc::new(FlakySource { broken: AtomicBool::new(false) });
    let am = AlumniMatch::with_providers(":memory:", source.clone()).unwrap();
    let first = am.train().await.unwrap();

    source.broken.store(true, Ordering::SeqCst);
    let err = am.train().await.unwrap_err();
    assert!(matches!(err, DomainError::DataSource(ref m) if m.contains("connection refused")));

    assert_eq!(am.model().unwrap().run_id().as_str(), first.run_id);
    assert_eq!(am.runs().unwrap().len(), 1);
    assert!(am.recommend(&query("python", "", ""), 1).is_ok());
}

#[tokio::test]
async fn test_empty_training_replaces_previous_model() {
    let (am, source) = setup(three_alumni());
    am.train().await.unwrap();
    assert!(am.recommend(&query("python", "", ""), 1).is_ok());

    source.replace(vec![student("s", "Sam", "python")]);
    let report = am.train().await.unwrap();
    assert_eq!(report.alumni, 0);
    assert!(matches!(
        am.recommend(&query("python", "", ""), 1),
        Err(DomainError::ModelUnavailable(_))
    ));
}

#[tokio::test]
async fn test_retraining_swaps_whole_model() {
    let (am, source) = setup(three_alumni());
    let first = am.train().await.unwrap();

    source.replace(vec![
        alumnus("x", "Xavier", Some("kotlin"), None, Some("Oslo")),
        alumnus("y", "Yara", Some("swift"), None, Some("Lima")),
    ]);
    let second = am.train().await.unwrap();
    assert_ne!(first.run_id, second.run_id);

    let model = am.model().unwrap();
    assert_eq!(model.run_id().as_str(), second.run_id);
    assert_eq!(model.vocabulary().terms(), &["kotlin", "lima", "oslo", "swift"]);
    assert_eq!(model.corpus().len(), 2);

    let recs = am.recommend(&query("python", "", "US"), 3).unwrap();
    assert!(recs.iter().all(|r| r.similarity_score == 0.0));
    assert_eq!(am.runs().unwrap().len(), 2);
}

#[tokio::test]
async fn test_train_from_json_export() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "u3": {{"userType": "student", "fullName": "Sam", "skills": "python"}},
            "u1": {{"userType": "alumni", "fullName": "Alice", "company": "Acme", "skills": "python", "location": "US"}},
            "u2": {{"userType": "alumni", "fullName": "Carol", "skills": "python java", "location": "UK"}}
        }}"#
    )
    .unwrap();

    let source = Arc::new(JsonFileSource::new(file.path()));
    let am = AlumniMatch::with_providers(":memory:", source).unwrap();
    let report = am.train().await.unwrap();
    assert_eq!(report.alumni, 2);

    let recs = am.recommend(&query("python", "", "US"), 3).unwrap();
    assert_eq!(recs[0].name, "Alice");
    assert_eq!(recs[0].company, "Acme");
    assert_eq!(recs[1].name, "Carol");
}

#[tokio::test]
async fn test_missing_export_is_data_source_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(JsonFileSource::new(dir.path().join("missing.json")));
    let am = AlumniMatch::with_providers(":memory:", source).unwrap();
    assert!(matches!(am.train().await, Err(DomainError::DataSource(_))));
    assert!(am.model().is_none());
}
