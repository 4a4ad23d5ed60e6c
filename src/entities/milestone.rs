//! Milestone entity - a dated checkpoint grouping features

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{Error, Result};
use crate::core::identity::EntityKind;

/// Milestone lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    #[default]
    Upcoming,
    Active,
    Completed,
    Missed,
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneStatus::Upcoming => write!(f, "upcoming"),
            MilestoneStatus::Active => write!(f, "active"),
            MilestoneStatus::Completed => write!(f, "completed"),
            MilestoneStatus::Missed => write!(f, "missed"),
        }
    }
}

impl FromStr for MilestoneStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(MilestoneStatus::Upcoming),
            "active" => Ok(MilestoneStatus::Active),
            "completed" => Ok(MilestoneStatus::Completed),
            "missed" => Ok(MilestoneStatus::Missed),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Milestone entity. Like epics, milestones hold feature IDs, not copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier (MILE-NNN, exactly three digits)
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO date `YYYY-MM-DD`, kept as written for round-trip fidelity
    pub target_date: String,

    #[serde(default)]
    pub status: MilestoneStatus,

    /// Ordered feature IDs (FEAT-NNN)
    #[serde(default)]
    pub features: Vec<String>,
}

impl Milestone {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        target_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            target_date: target_date.into(),
            status: MilestoneStatus::default(),
            features: Vec::new(),
        }
    }

    /// Check construction constraints
    pub fn validate(&self) -> Result<()> {
        if !EntityKind::Milestone.matches(&self.id) {
            return Err(Error::schema("ID", &self.id, "expected MILE-NNN (three digits)"));
        }
        if self.title.trim().is_empty() {
            return Err(Error::schema("Title", &self.title, "title is empty"));
        }
        for feature_id in &self.features {
            if !EntityKind::Feature.matches(feature_id) {
                return Err(Error::schema("Features", feature_id, "expected FEAT-NNN"));
            }
        }
        Ok(())
    }

    /// Parse the target date, `None` when it is not a valid `YYYY-MM-DD`.
    /// A malformed date is not a schema violation; hand-edited files keep
    /// whatever was written and collaborators decide how to treat it.
    pub fn target_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.target_date.trim(), "%Y-%m-%d").ok()
    }
}
