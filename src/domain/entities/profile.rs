use crate::domain::error::DomainError;
use crate::domain::values::user_type::UserType;
use serde::{Deserialize, Serialize};

/// Keys a query or user record may carry as matching attributes.
pub const FEATURE_KEYS: [&str; 3] = ["skills", "language", "location"];

/// Self-declared attributes used for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFeatures {
    pub skills: Option<String>,
    pub language: Option<String>,
    pub location: Option<String>,
}

impl ProfileFeatures {
    pub fn new(skills: Option<&str>, language: Option<&str>, location: Option<&str>) -> Self {
        Self {
            skills: skills.map(String::from),
            language: language.map(String::from),
            location: location.map(String::from),
        }
    }

    /// Text representation for vectorization: skills, language, location,
    /// space-joined, empty fields skipped.
    pub fn compose(&self) -> String {
        [&self.skills, &self.language, &self.location]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True when no field carries any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        [&self.skills, &self.language, &self.location]
            .into_iter()
            .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
    }

    /// Parse an unstructured query object. Unknown keys are ignored, `null`
    /// counts as absent, scalars are converted to text.
    pub fn from_query(value: &serde_json::Value) -> Result<Self, DomainError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DomainError::InvalidQuery("query must be a JSON object".into()))?;

        let mut fields = [None, None, None];
        for (slot, key) in fields.iter_mut().zip(FEATURE_KEYS) {
            if let Some(v) = obj.get(key) {
                *slot = text_value(v).map_err(|kind| {
                    DomainError::InvalidQuery(format!("field '{key}' must be text, got {kind}"))
                })?;
            }
        }
        let [skills, language, location] = fields;
        let features = Self { skills, language, location };

        if features.is_blank() {
            return Err(DomainError::InvalidQuery(
                "at least one of skills, language, location is required".into(),
            ));
        }
        Ok(features)
    }
}

/// Lenient text conversion used for query input and source records.
/// Returns the JSON type name for values that have no text form.
pub fn text_value(value: &serde_json::Value) -> Result<Option<String>, &'static str> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s.clone())),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        serde_json::Value::Array(_) => Err("array"),
        serde_json::Value::Object(_) => Err("object"),
    }
}

/// A user as delivered by the profile source, before the alumni filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub user_type: UserType,
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub features: ProfileFeatures,
}

impl UserRecord {
    pub fn alumni(id: &str, full_name: &str, features: ProfileFeatures) -> Self {
        Self {
            id: id.to_string(),
            user_type: UserType::Alumni,
            full_name: full_name.to_string(),
            features,
            ..Default::default()
        }
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = company.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compose_field_order() {
        let p = ProfileFeatures::new(Some("a"), None, Some("b"));
        assert_eq!(p.compose(), "a b");
        let full = ProfileFeatures::new(Some("rust go"), Some("english"), Some("Berlin"));
        assert_eq!(full.compose(), "rust go english Berlin");
    }

    #[test]
    fn test_compose_skips_empty_fields() {
        let p = ProfileFeatures::new(Some(""), Some("c++"), Some(""));
        assert_eq!(p.compose(), "c++");
        assert_eq!(ProfileFeatures::default().compose(), "");
    }

    #[test]
    fn test_compose_is_deterministic() {
        let p = ProfileFeatures::new(Some("python"), Some(""), Some("US"));
        assert_eq!(p.compose(), p.compose());
        assert_eq!(p.compose(), "python US");
    }

    #[test]
    fn test_from_query_accepts_partial_input() {
        let q = ProfileFeatures::from_query(&json!({"skills": "python", "location": null})).unwrap();
        assert_eq!(q.skills.as_deref(), Some("python"));
        assert_eq!(q.location, None);
    }

    #[test]
    fn test_from_query_converts_scalars() {
        let q = ProfileFeatures::from_query(&json!({"language": 42})).unwrap();
        assert_eq!(q.language.as_deref(), Some("42"));
    }

    #[test]
    fn test_from_query_rejects_missing_fields() {
        let err = ProfileFeatures::from_query(&json!({"name": "x"})).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuery(_)));
        let err = ProfileFeatures::from_query(&json!({"skills": "  ", "language": ""})).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuery(_)));
    }

    #[test]
    fn test_from_query_rejects_non_text() {
        let err = ProfileFeatures::from_query(&json!({"skills": ["a"]})).unwrap_err();
        assert!(err.to_string().contains("array"));
        assert!(ProfileFeatures::from_query(&json!("python")).is_err());
    }
}
