//! Epic entity - a large body of work broken into features

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{Error, Result};
use crate::core::identity::EntityKind;

/// Epic lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EpicStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
}

impl fmt::Display for EpicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpicStatus::Planning => write!(f, "planning"),
            EpicStatus::InProgress => write!(f, "in-progress"),
            EpicStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for EpicStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(EpicStatus::Planning),
            "in-progress" => Ok(EpicStatus::InProgress),
            "completed" => Ok(EpicStatus::Completed),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Epic entity. Features are held as ID references, never nested copies;
/// each feature is an independently owned file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epic {
    /// Unique identifier (EPIC-NNN)
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub status: EpicStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Estimated hours, must be positive
    pub estimate: f64,

    /// Hours spent so far
    #[serde(default)]
    pub actual: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered feature IDs (FEAT-NNN)
    #[serde(default)]
    pub features: Vec<String>,
}

impl Epic {
    /// Create an epic with defaults for the optional fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimate: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: EpicStatus::default(),
            owner: None,
            estimate,
            actual: 0.0,
            description: None,
            features: Vec::new(),
        }
    }

    /// Check construction constraints. Whether the listed feature IDs
    /// resolve to existing features is the validator's job, not this one.
    pub fn validate(&self) -> Result<()> {
        if !EntityKind::Epic.matches(&self.id) {
            return Err(Error::schema("ID", &self.id, "expected EPIC-NNN"));
        }
        if self.title.trim().is_empty() {
            return Err(Error::schema("Title", &self.title, "title is empty"));
        }
        if self.estimate <= 0.0 {
            return Err(Error::schema(
                "Estimate",
                self.estimate.to_string(),
                "estimate must be positive",
            ));
        }
        if self.actual < 0.0 {
            return Err(Error::schema(
                "Actual",
                self.actual.to_string(),
                "actual hours cannot be negative",
            ));
        }
        for feature_id in &self.features {
            if !EntityKind::Feature.matches(feature_id) {
                return Err(Error::schema("Features", feature_id, "expected FEAT-NNN"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epic_defaults() {
        let epic = Epic::new("EPIC-001", "Auth", 80.0);
        assert_eq!(epic.status, EpicStatus::Planning);
        assert_eq!(epic.actual, 0.0);
        assert!(epic.owner.is_none());
        assert!(epic.features.is_empty());
        assert!(epic.validate().is_ok());
    }

    #[test]
    fn test_epic_rejects_bad_id() {
        let epic = Epic::new("FEAT-001", "Auth", 80.0);
        let err = epic.validate().unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { ref field, .. } if field == "ID"));
    }

    #[test]
    fn test_epic_rejects_nonpositive_estimate() {
        let epic = Epic::new("EPIC-001", "Auth", 0.0);
        assert!(epic.validate().is_err());
    }

    #[test]
    fn test_epic_rejects_bad_feature_ref() {
        let mut epic = Epic::new("EPIC-001", "Auth", 80.0);
        epic.features.push("STORY-001".to_string());
        assert!(epic.validate().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("in-progress".parse::<EpicStatus>().unwrap(), EpicStatus::InProgress);
        assert_eq!("PLANNING".parse::<EpicStatus>().unwrap(), EpicStatus::Planning);
        assert!("done".parse::<EpicStatus>().is_err());
    }

    #[test]
    fn test_status_serde_rename() {
        let json = serde_json::to_string(&EpicStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
