//! Feature entity - a deliverable within an epic, with its user stories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{Error, Result};
use crate::core::identity::EntityKind;

/// Work status shared by features and user stories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkStatus::Todo => write!(f, "todo"),
            WorkStatus::InProgress => write!(f, "in-progress"),
            WorkStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(WorkStatus::Todo),
            "in-progress" => Ok(WorkStatus::InProgress),
            "done" => Ok(WorkStatus::Done),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// How one feature depends on another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// The named feature must finish first
    Blocks,
    /// Informational link, never blocks scheduling
    RelatesTo,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Blocks => write!(f, "blocks"),
            DependencyKind::RelatesTo => write!(f, "relates-to"),
        }
    }
}

/// A dependency edge from the owning feature to `feature_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub feature_id: String,
    pub kind: DependencyKind,
}

/// A user story owned by its parent feature. Stories have no file of their
/// own; they live in the feature's `## User Stories` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    /// Unique identifier (STORY-NNN)
    pub id: String,

    pub title: String,

    /// Estimated hours, must be positive
    pub estimate: u32,

    #[serde(default)]
    pub status: WorkStatus,

    /// Back-reference to the owning feature, set during decode rather than
    /// persisted independently
    pub feature_id: String,
}

/// Feature entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Unique identifier (FEAT-NNN)
    pub id: String,

    pub title: String,

    /// REQUIRED: parent epic ID (EPIC-NNN)
    pub epic_id: String,

    #[serde(default)]
    pub status: WorkStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Estimated hours, must be positive
    pub estimate: f64,

    /// Hours spent so far
    #[serde(default)]
    pub actual: f64,

    /// Skill tags needed to build this, order preserved
    #[serde(default)]
    pub skills_required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub user_stories: Vec<UserStory>,

    #[serde(default)]
    pub acceptance_criteria: Vec<String>,

    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Feature {
    /// Create a feature with defaults for the optional fields
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        epic_id: impl Into<String>,
        estimate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            epic_id: epic_id.into(),
            status: WorkStatus::default(),
            assignee: None,
            estimate,
            actual: 0.0,
            skills_required: Vec::new(),
            description: None,
            user_stories: Vec::new(),
            acceptance_criteria: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Check construction constraints, including the nested stories and
    /// dependency targets. Whether `epic_id` names a real epic is the
    /// validator's job.
    pub fn validate(&self) -> Result<()> {
        if !EntityKind::Feature.matches(&self.id) {
            return Err(Error::schema("ID", &self.id, "expected FEAT-NNN"));
        }
        if self.title.trim().is_empty() {
            return Err(Error::schema("Title", &self.title, "title is empty"));
        }
        if !EntityKind::Epic.matches(&self.epic_id) {
            return Err(Error::schema("Epic", &self.epic_id, "expected EPIC-NNN"));
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
        for story in &self.user_stories {
            if !EntityKind::Story.matches(&story.id) {
                return Err(Error::schema("User Stories", &story.id, "expected STORY-NNN"));
            }
            if story.title.trim().is_empty() {
                return Err(Error::schema("User Stories", &story.id, "story title is empty"));
            }
            if story.estimate == 0 {
                return Err(Error::schema(
                    "User Stories",
                    &story.id,
                    "story estimate must be positive",
                ));
            }
        }
        for dep in &self.dependencies {
            if !EntityKind::Feature.matches(&dep.feature_id) {
                return Err(Error::schema("Dependencies", &dep.feature_id, "expected FEAT-NNN"));
            }
        }
        Ok(())
    }

    /// IDs of features this one is blocked by
    pub fn blocking_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Blocks)
            .map(|d| d.feature_id.as_str())
    }
}
