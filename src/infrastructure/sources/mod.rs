pub mod firebase;
pub mod json_file;
pub mod memory;

use crate::domain::entities::profile::{text_value, ProfileFeatures, UserRecord};
use crate::domain::error::DomainError;
use crate::domain::values::user_type::UserType;
use serde_json::Value;

/// Parses a users payload: `null`, an object keyed by user id (ordered by
/// id), or an array of records carrying their own `id`.
pub fn parse_users(payload: Value) -> Result<Vec<UserRecord>, DomainError> {
    match payload {
        Value::Null => Ok(vec![]),
        Value::Object(map) => {
            let mut users = map
                .into_iter()
                .map(|(id, record)| parse_user(Some(id), &record))
                .collect::<Result<Vec<_>, _>>()?;
            users.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(users)
        }
        Value::Array(items) => items.iter().map(|record| parse_user(None, record)).collect(),
        other => Err(DomainError::DataSource(format!(
            "expected users object or array, got {}",
            type_name(&other)
        ))),
    }
}

fn parse_user(id: Option<String>, record: &Value) -> Result<UserRecord, DomainError> {
    let obj = record
        .as_object()
        .ok_or_else(|| DomainError::DataSource(format!("user record is {}", type_name(record))))?;
    let field = |key: &str| obj.get(key).and_then(lenient_text);

    let id = match id {
        Some(id) => id,
        None => field("id").ok_or_else(|| DomainError::DataSource("user record without id".into()))?,
    };
    let user_type = field("userType")
        .unwrap_or_default()
        .parse::<UserType>()
        .map_err(DomainError::DataSource)?;

    // Other roles never reach the corpus; their attributes are not read.
    if !user_type.is_alumni() {
        return Ok(UserRecord {
            id,
            user_type,
            ..Default::default()
        });
    }

    Ok(UserRecord {
        id,
        user_type,
        full_name: field("fullName").unwrap_or_default(),
        email: field("email").unwrap_or_default(),
        company: field("company").unwrap_or_default(),
        features: ProfileFeatures {
            skills: field("skills"),
            language: field("language"),
            location: field("location"),
        },
    })
}

/// Text form of a stored attribute. Lists of scalars are space-joined;
/// objects and lists without scalars count as absent.
fn lenient_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|v| text_value(v).ok().flatten())
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        other => text_value(other).ok().flatten(),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object_payload_sorted_by_id() {
        let users = parse_users(json!({
            "u2": {"userType": "student", "fullName": "Sam"},
            "u1": {"userType": "alumni", "fullName": "Ada", "skills": "rust", "company": "Acme"}
        }))
        .unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "u1");
        assert_eq!(users[0].user_type, UserType::Alumni);
        assert_eq!(users[0].company, "Acme");
        assert_eq!(users[0].features.skills.as_deref(), Some("rust"));
        assert_eq!(users[1].user_type, UserType::Student);
    }

    #[test]
    fn test_parse_array_payload() {
        let users = parse_users(json!([{"id": "x", "userType": "alumni", "location": "Paris"}])).unwrap();
        assert_eq!(users[0].id, "x");
        assert_eq!(users[0].features.location.as_deref(), Some("Paris"));
        assert_eq!(users[0].full_name, "");
    }

    #[test]
    fn test_parse_null_is_empty() {
        assert!(parse_users(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_payloads() {
        assert!(matches!(parse_users(json!("users")), Err(DomainError::DataSource(_))));
        assert!(parse_users(json!([{"userType": "alumni"}])).is_err());
        assert!(parse_users(json!({"u": 7})).is_err());
    }

    #[test]
    fn test_non_alumni_attributes_are_not_read() {
        let users = parse_users(json!({
            "a1": {"userType": "alumni", "skills": "python"},
            "s1": {"userType": "student", "skills": ["python", "java"], "company": {"name": "Acme"}}
        }))
        .unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].features.skills.as_deref(), Some("python"));
        assert_eq!(users[1].user_type, UserType::Student);
        assert_eq!(users[1].features, ProfileFeatures::default());
    }

    #[test]
    fn test_alumni_list_fields_are_joined() {
        let users = parse_users(json!({
            "a1": {
                "userType": "alumni",
                "skills": ["python", "java", null, {"x": 1}],
                "language": [],
                "location": {"city": "Paris"},
                "company": 42
            }
        }))
        .unwrap();
        assert_eq!(users[0].features.skills.as_deref(), Some("python java"));
        assert_eq!(users[0].features.language, None);
        assert_eq!(users[0].features.location, None);
        assert_eq!(users[0].company, "42");
    }
}
