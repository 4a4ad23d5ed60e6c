//! Canonical encode: entities into structured text
//!
//! The structural inverse of [`super::decode`]: title line, metadata lines
//! in a fixed field order (optional lines only when present), then section
//! blocks in a fixed order, each emitted only when its collection or string
//! is non-empty. For every entity accepted by the model,
//! `decode(encode(e))` reproduces all scalar and reference-list fields.

use crate::core::team::Team;
use crate::entities::{DependencyKind, Epic, Feature, Milestone, Project, WorkStatus};

/// Render an epic file
pub fn encode_epic(epic: &Epic) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Epic: {}", epic.title));
    lines.push(String::new());
    lines.push(format!("- **ID**: {}", epic.id));
    lines.push(format!("- **Status**: {}", epic.status));
    if let Some(owner) = &epic.owner {
        lines.push(format!("- **Owner**: {}", owner));
    }
    lines.push(format!("- **Estimate**: {} hours", epic.estimate));
    lines.push(format!("- **Actual**: {} hours", epic.actual));
    lines.push(String::new());

    if let Some(description) = &epic.description {
        lines.push("## Description".to_string());
        lines.push(description.clone());
        lines.push(String::new());
    }

    if !epic.features.is_empty() {
        lines.push("## Features".to_string());
        for feature_id in &epic.features {
            // the checkbox is informational; the epic stores only the ID
            lines.push(format!("- [ ] {}: [Feature title]", feature_id));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render a feature file
pub fn encode_feature(feature: &Feature) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Feature: {}", feature.title));
    lines.push(String::new());
    lines.push(format!("- **ID**: {}", feature.id));
    lines.push(format!("- **Epic**: {}", feature.epic_id));
    lines.push(format!("- **Status**: {}", feature.status));
    if let Some(assignee) = &feature.assignee {
        lines.push(format!("- **Assignee**: {}", assignee));
    }
    lines.push(format!("- **Estimate**: {} hours", feature.estimate));
    lines.push(format!("- **Actual**: {} hours", feature.actual));
    if !feature.skills_required.is_empty() {
        lines.push(format!(
            "- **Skills Required**: {}",
            feature.skills_required.join(", ")
        ));
    }
    lines.push(String::new());

    if let Some(description) = &feature.description {
        lines.push("## Description".to_string());
        lines.push(description.clone());
        lines.push(String::new());
    }

    if !feature.user_stories.is_empty() {
        lines.push("## User Stories".to_string());
        for story in &feature.user_stories {
            let checkbox = if story.status == WorkStatus::Done {
                "[x]"
            } else {
                "[ ]"
            };
            lines.push(format!(
                "- {} {}: {} ({}h)",
                checkbox, story.id, story.title, story.estimate
            ));
        }
        lines.push(String::new());
    }

    if !feature.acceptance_criteria.is_empty() {
        lines.push("## Acceptance Criteria".to_string());
        for criterion in &feature.acceptance_criteria {
            lines.push(format!("- [ ] {}", criterion));
        }
        lines.push(String::new());
    }

    if !feature.dependencies.is_empty() {
        lines.push("## Dependencies".to_string());
        let blocks: Vec<&str> = feature
            .dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Blocks)
            .map(|d| d.feature_id.as_str())
            .collect();
        let relates_to: Vec<&str> = feature
            .dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::RelatesTo)
            .map(|d| d.feature_id.as_str())
            .collect();
        if !blocks.is_empty() {
            lines.push(format!("- blocks: {}", blocks.join(", ")));
        }
        if !relates_to.is_empty() {
            lines.push(format!("- relates-to: {}", relates_to.join(", ")));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render a milestone file
pub fn encode_milestone(milestone: &Milestone) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Milestone: {}", milestone.title));
    lines.push(String::new());
    lines.push(format!("- **ID**: {}", milestone.id));
    lines.push(format!("- **Target Date**: {}", milestone.target_date));
    lines.push(format!("- **Status**: {}", milestone.status));
    lines.push(String::new());

    if let Some(description) = &milestone.description {
        lines.push("## Description".to_string());
        lines.push(description.clone());
        lines.push(String::new());
    }

    if !milestone.features.is_empty() {
        lines.push("## Features".to_string());
        for feature_id in &milestone.features {
            lines.push(format!("- [ ] {}", feature_id));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render the singleton project.md
pub fn encode_project(project: &Project) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Project: {}", project.name));
    lines.push(String::new());

    if let Some(overview) = &project.overview {
        lines.push("## Overview".to_string());
        lines.push(overview.clone());
        lines.push(String::new());
    }

    if let Some(timeline) = &project.timeline {
        lines.push("## Timeline".to_string());
        if let Some(start) = &timeline.start {
            lines.push(format!("- Start: {}", start));
        }
        if let Some(end) = &timeline.end {
            lines.push(format!("- End: {}", end));
        }
        lines.push(String::new());
    }

    if let Some(capacity) = &project.team_capacity {
        lines.push("## Team Capacity".to_string());
        if let Some(total) = capacity.total {
            lines.push(format!("- Total: {} person-weeks", total));
        }
        if let Some(available) = capacity.available {
            lines.push(format!("- Available: {} person-weeks", available));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render the singleton team.md
pub fn encode_team(team: &Team) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Team".to_string());
    lines.push(String::new());
    lines.push("## Members".to_string());
    lines.push(String::new());

    for member in &team.members {
        lines.push(format!("### {}", member.name));
        lines.push(format!("- **Skills**: {}", member.skills.join(", ")));
        lines.push(format!("- **Capacity**: {} hours/week", member.capacity));
        lines.push(format!(
            "- **Current Load**: {} hours/week",
            member.current_load
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode::{
        decode_epic, decode_feature, decode_milestone, decode_project, decode_team,
    };
    use crate::core::team::TeamMember;
    use crate::entities::{Dependency, EpicStatus, MilestoneStatus, TeamCapacity, Timeline, UserStory};

    fn full_epic() -> Epic {
        Epic {
            id: "EPIC-001".to_string(),
            title: "User Authentication".to_string(),
            status: EpicStatus::InProgress,
            owner: Some("Alice".to_string()),
            estimate: 80.0,
            actual: 12.5,
            description: Some("Build a complete authentication system.".to_string()),
            features: vec!["FEAT-001".to_string(), "FEAT-002".to_string()],
        }
    }

    fn full_feature() -> Feature {
        Feature {
            id: "FEAT-001".to_string(),
            title: "Login form".to_string(),
            epic_id: "EPIC-001".to_string(),
            status: WorkStatus::InProgress,
            assignee: Some("Bob".to_string()),
            estimate: 16.0,
            actual: 4.0,
            skills_required: vec!["TypeScript".to_string(), "React".to_string()],
            description: Some("Email/password login.".to_string()),
            user_stories: vec![
                UserStory {
                    id: "STORY-001".to_string(),
                    title: "Render the form".to_string(),
                    estimate: 4,
                    status: WorkStatus::Done,
                    feature_id: "FEAT-001".to_string(),
                },
                UserStory {
                    id: "STORY-002".to_string(),
                    title: "Validate credentials".to_string(),
                    estimate: 8,
                    status: WorkStatus::Todo,
                    feature_id: "FEAT-001".to_string(),
                },
            ],
            acceptance_criteria: vec![
                "Form rejects bad passwords".to_string(),
                "Session cookie is set".to_string(),
            ],
            dependencies: vec![
                Dependency {
                    feature_id: "FEAT-002".to_string(),
                    kind: DependencyKind::Blocks,
                },
                Dependency {
                    feature_id: "FEAT-005".to_string(),
                    kind: DependencyKind::RelatesTo,
                },
            ],
        }
    }

    #[test]
    fn test_epic_roundtrip() {
        let epic = full_epic();
        let decoded = decode_epic(&encode_epic(&epic)).unwrap();
        assert_eq!(decoded, epic);
    }

    #[test]
    fn test_epic_encode_layout() {
        let text = encode_epic(&full_epic());
        assert!(text.starts_with("# Epic: User Authentication\n"));
        assert!(text.contains("- **Estimate**: 80 hours"));
        assert!(text.contains("- **Actual**: 12.5 hours"));
        assert!(text.contains("- [ ] FEAT-001: [Feature title]"));
    }

    #[test]
    fn test_epic_encode_omits_absent_optionals() {
        let epic = Epic::new("EPIC-002", "Search", 40.0);
        let text = encode_epic(&epic);
        assert!(!text.contains("Owner"));
        assert!(!text.contains("## Description"));
        assert!(!text.contains("## Features"));
    }

    #[test]
    fn test_feature_roundtrip() {
        let feature = full_feature();
        let decoded = decode_feature(&encode_feature(&feature)).unwrap();
        assert_eq!(decoded, feature);
    }

    #[test]
    fn test_feature_story_checkboxes() {
        let text = encode_feature(&full_feature());
        assert!(text.contains("- [x] STORY-001: Render the form (4h)"));
        assert!(text.contains("- [ ] STORY-002: Validate credentials (8h)"));
        assert!(text.contains("- blocks: FEAT-002"));
        assert!(text.contains("- relates-to: FEAT-005"));
    }

    #[test]
    fn test_in_progress_story_does_not_roundtrip() {
        // the checkbox carries two states; in-progress re-decodes as todo
        let mut feature = full_feature();
        feature.user_stories[1].status = WorkStatus::InProgress;
        let decoded = decode_feature(&encode_feature(&feature)).unwrap();
        assert_eq!(decoded.user_stories[1].status, WorkStatus::Todo);
    }

    #[test]
    fn test_milestone_roundtrip() {
        let milestone = Milestone {
            id: "MILE-001".to_string(),
            title: "Beta launch".to_string(),
            description: Some("Feature-complete beta.".to_string()),
            target_date: "2026-03-01".to_string(),
            status: MilestoneStatus::Active,
            features: vec!["FEAT-001".to_string(), "FEAT-003".to_string()],
        };
        let decoded = decode_milestone(&encode_milestone(&milestone)).unwrap();
        assert_eq!(decoded, milestone);
    }

    #[test]
    fn test_project_roundtrip() {
        let project = Project {
            name: "Apollo".to_string(),
            overview: Some("Ship the thing.".to_string()),
            timeline: Some(Timeline {
                start: Some("2026-01-01".to_string()),
                end: Some("2026-06-30".to_string()),
            }),
            team_capacity: Some(TeamCapacity {
                total: Some(120.0),
                available: Some(80.0),
            }),
        };
        let decoded = decode_project(&encode_project(&project));
        assert_eq!(decoded, project);
    }

    #[test]
    fn test_team_roundtrip() {
        let team = Team {
            members: vec![
                TeamMember {
                    name: "Alice".to_string(),
                    skills: vec!["TypeScript".to_string(), "React".to_string()],
                    capacity: 40.0,
                    current_load: 25.0,
                },
                TeamMember {
                    name: "Bob".to_string(),
                    skills: vec!["Python".to_string()],
                    capacity: 30.0,
                    current_load: 0.0,
                },
            ],
        };
        let decoded = decode_team(&encode_team(&team));
        assert_eq!(decoded, team);
    }
}
