//! Team roster: members, skills, and capacity
//!
//! The team is a singleton `team.md` file rather than one file per member.
//! Skill comparisons are case-insensitive throughout so `typescript` in a
//! roster satisfies a feature asking for `TypeScript`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::error::{Error, Result};

/// A team member with skills and weekly capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,

    /// Skill tags, order preserved as written in team.md
    #[serde(default)]
    pub skills: Vec<String>,

    /// Hours per week this member can work
    pub capacity: f64,

    /// Hours per week currently assigned
    #[serde(default)]
    pub current_load: f64,
}

impl TeamMember {
    /// Create a member with no skills and no current load
    pub fn new(name: impl Into<String>, capacity: f64) -> Self {
        Self {
            name: name.into(),
            skills: Vec::new(),
            capacity,
            current_load: 0.0,
        }
    }

    /// Check construction constraints: non-empty name, positive capacity,
    /// non-negative current load.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::schema("name", &self.name, "member name is empty"));
        }
        if self.capacity <= 0.0 {
            return Err(Error::schema(
                "capacity",
                self.capacity.to_string(),
                "capacity must be positive",
            ));
        }
        if self.current_load < 0.0 {
            return Err(Error::schema(
                "current_load",
                self.current_load.to_string(),
                "current load cannot be negative",
            ));
        }
        Ok(())
    }

    /// Jaccard similarity between this member's skills and a required set,
    /// case-insensitive. No requirements counts as a perfect match.
    pub fn skill_match(&self, required: &[String]) -> f64 {
        if required.is_empty() {
            return 1.0;
        }
        let mine: HashSet<String> = self.skills.iter().map(|s| s.to_lowercase()).collect();
        let wanted: HashSet<String> = required.iter().map(|s| s.to_lowercase()).collect();
        let intersection = mine.intersection(&wanted).count();
        let union = mine.union(&wanted).count();
        intersection as f64 / union as f64
    }

    /// Required skills this member does not have
    pub fn missing_skills(&self, required: &[String]) -> Vec<String> {
        let mine: HashSet<String> = self.skills.iter().map(|s| s.to_lowercase()).collect();
        required
            .iter()
            .filter(|skill| !mine.contains(&skill.to_lowercase()))
            .cloned()
            .collect()
    }

    /// Current load as a percentage of capacity (can exceed 100)
    pub fn load_percentage(&self) -> f64 {
        if self.capacity == 0.0 {
            return 0.0;
        }
        self.current_load / self.capacity * 100.0
    }

    pub fn is_overallocated(&self) -> bool {
        self.current_load > self.capacity
    }

    /// Hours still available this week, clamped at zero
    pub fn available_hours(&self) -> f64 {
        (self.capacity - self.current_load).max(0.0)
    }
}

/// The full team roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Team {
    /// Union of all members' skills, lowercased. This is the set the
    /// validator checks feature skill requirements against.
    pub fn skill_union(&self) -> HashSet<String> {
        self.members
            .iter()
            .flat_map(|m| m.skills.iter().map(|s| s.to_lowercase()))
            .collect()
    }

    /// Check construction constraints for every member
    pub fn validate(&self) -> Result<()> {
        for member in &self.members {
            member.validate()?;
        }
        Ok(())
    }
}
