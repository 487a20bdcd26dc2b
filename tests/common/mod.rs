//! Shared test helpers.
#![allow(dead_code)]

use alumni_match::domain::entities::profile::{ProfileFeatures, UserRecord};
use alumni_match::domain::values::user_type::UserType;
use alumni_match::infrastructure::sources::memory::StaticSource;
use alumni_match::AlumniMatch;
use std::sync::Arc;

pub fn setup(users: Vec<UserRecord>) -> (AlumniMatch, Arc<StaticSource>) {
    let source = Arc::new(StaticSource::new(users));
    let am = AlumniMatch::with_providers(":memory:", source.clone()).unwrap();
    (am, source)
}

pub fn alumnus(id: &str, name: &str, skills: Option<&str>, language: Option<&str>, location: Option<&str>) -> UserRecord {
    UserRecord::alumni(id, name, ProfileFeatures::new(skills, language, location))
        .with_company(&format!("{name} Corp"))
        .with_email(&format!("{}@example.com", name.to_lowercase()))
}

pub fn student(id: &str, name: &str, skills: &str) -> UserRecord {
    let mut u = alumnus(id, name, Some(skills), None, None);
    u.user_type = UserType::Student;
    u
}

/// Alice (python, US), Bob (java, US), Carol (python java, UK).
pub fn three_alumni() -> Vec<UserRecord> {
    vec![
        alumnus("a", "Alice", Some("python"), None, Some("US")),
        alumnus("b", "Bob", Some("java"), None, Some("US")),
        alumnus("c", "Carol", Some("python java"), None, Some("UK")),
    ]
}

pub fn query(skills: &str, language: &str, location: &str) -> ProfileFeatures {
    ProfileFeatures::new(Some(skills), Some(language), Some(location))
}
