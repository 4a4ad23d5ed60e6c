//! Project entity - the singleton `project.md` at the data directory root

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Project start/end dates, each optional and kept as written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Timeline {
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_iso_date(self.start.as_deref()?)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_iso_date(self.end.as_deref()?)
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Person-week totals for the whole team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamCapacity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<f64>,
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_capacity: Option<TeamCapacity>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overview: None,
            timeline: None,
            team_capacity: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::schema("Name", &self.name, "project name is empty"));
        }
        Ok(())
    }
}
