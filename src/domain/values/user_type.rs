use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a user declared when signing up. Only alumni are recommendable.
/// Serialized as its plain role string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum UserType {
    Alumni,
    Student,
    /// Any other role string, kept verbatim.
    Other(String),
    #[default]
    Unknown,
}

impl UserType {
    pub fn is_alumni(&self) -> bool {
        matches!(self, UserType::Alumni)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alumni => write!(f, "alumni"),
            Self::Student => write!(f, "student"),
            Self::Other(role) => write!(f, "{role}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alumni" => Ok(Self::Alumni),
            "student" => Ok(Self::Student),
            "" | "unknown" => Ok(Self::Unknown),
            _ => Ok(Self::Other(s.trim().to_string())),
        }
    }
}

impl From<UserType> for String {
    fn from(t: UserType) -> Self {
        t.to_string()
    }
}

impl TryFrom<String> for UserType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alumni_is_case_insensitive() {
        assert!("Alumni".parse::<UserType>().unwrap().is_alumni());
        assert!(" alumni ".parse::<UserType>().unwrap().is_alumni());
    }

    #[test]
    fn test_other_roles_are_not_alumni() {
        let mentor: UserType = "mentor".parse().unwrap();
        assert_eq!(mentor, UserType::Other("mentor".into()));
        assert!(!mentor.is_alumni());
        assert!(!"student".parse::<UserType>().unwrap().is_alumni());
        assert_eq!("".parse::<UserType>().unwrap(), UserType::Unknown);
    }

    #[test]
    fn test_serializes_as_role_string() {
        let mentor = UserType::Other("mentor".into());
        assert_eq!(serde_json::to_string(&mentor).unwrap(), "\"mentor\"");
        assert_eq!(serde_json::to_string(&UserType::Alumni).unwrap(), "\"alumni\"");
        for t in [UserType::Alumni, UserType::Student, UserType::Unknown, mentor] {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(serde_json::from_str::<UserType>(&json).unwrap(), t);
        }
    }
}
