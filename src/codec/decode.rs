//! Tolerant decode: structured text into entities
//!
//! Missing optional sections and metadata decode to defaults (empty lists,
//! empty strings, zero) rather than errors; hand-edited files should never
//! hard-fail here. The only decode-time errors are unrecognized enum values.
//! ID/numeric constraints are deferred to each entity's `validate()`, which
//! the store runs after decode.

use std::str::FromStr;

use crate::codec::{checkbox_items, comma_list, leading_number, metadata_line, Document};
use crate::core::error::{Error, Result};
use crate::core::identity::EntityKind;
use crate::core::team::{Team, TeamMember};
use crate::entities::{
    Dependency, DependencyKind, Epic, Feature, Milestone, Project, TeamCapacity, Timeline,
    UserStory, WorkStatus,
};

/// Decode an epic file
pub fn decode_epic(text: &str) -> Result<Epic> {
    let doc = Document::scan(text);

    Ok(Epic {
        id: doc.meta("ID").unwrap_or_default().to_string(),
        title: doc.title_for("Epic"),
        status: status_meta(&doc, "Status")?,
        owner: doc.meta("Owner").map(str::to_string),
        estimate: leading_number(doc.meta("Estimate")),
        actual: leading_number(doc.meta("Actual")),
        description: trimmed_section(&doc, "Description"),
        features: doc
            .section("Features")
            .map(checkbox_feature_ids)
            .unwrap_or_default(),
    })
}

/// Decode a feature file.
///
/// Story checkboxes are honored: `[x]` decodes to `done`, `[ ]` to `todo`.
/// An `in-progress` story therefore does not survive a round trip (it
/// encodes as `[ ]` and re-decodes as `todo`); the checkbox simply cannot
/// carry three states.
pub fn decode_feature(text: &str) -> Result<Feature> {
    let doc = Document::scan(text);
    let id = doc.meta("ID").unwrap_or_default().to_string();

    let user_stories = doc
        .section("User Stories")
        .map(|body| story_items(body, &id))
        .unwrap_or_default();

    let acceptance_criteria = doc
        .section("Acceptance Criteria")
        .map(|body| {
            checkbox_items(body)
                .into_iter()
                .map(|item| item.text)
                .collect()
        })
        .unwrap_or_default();

    let mut dependencies = Vec::new();
    if let Some(body) = doc.section("Dependencies") {
        for target in dependency_targets(body, "blocks") {
            dependencies.push(Dependency {
                feature_id: target,
                kind: DependencyKind::Blocks,
            });
        }
        for target in dependency_targets(body, "relates-to") {
            dependencies.push(Dependency {
                feature_id: target,
                kind: DependencyKind::RelatesTo,
            });
        }
    }

    Ok(Feature {
        title: doc.title_for("Feature"),
        epic_id: doc.meta("Epic").unwrap_or_default().to_string(),
        status: status_meta(&doc, "Status")?,
        assignee: doc.meta("Assignee").map(str::to_string),
        estimate: leading_number(doc.meta("Estimate")),
        actual: leading_number(doc.meta("Actual")),
        skills_required: doc.meta("Skills Required").map(comma_list).unwrap_or_default(),
        description: trimmed_section(&doc, "Description"),
        user_stories,
        acceptance_criteria,
        dependencies,
        id,
    })
}

/// Decode a milestone file
pub fn decode_milestone(text: &str) -> Result<Milestone> {
    let doc = Document::scan(text);

    Ok(Milestone {
        id: doc.meta("ID").unwrap_or_default().to_string(),
        title: doc.title_for("Milestone"),
        description: trimmed_section(&doc, "Description"),
        target_date: doc.meta("Target Date").unwrap_or_default().to_string(),
        status: status_meta(&doc, "Status")?,
        features: doc
            .section("Features")
            .map(checkbox_feature_ids)
            .unwrap_or_default(),
    })
}

/// Decode the singleton project.md. Infallible: the project file has no
/// enum fields, so every input yields some project.
pub fn decode_project(text: &str) -> Project {
    let doc = Document::scan(text);

    let name = match (doc.heading_kind.as_deref(), doc.heading_title.as_deref()) {
        (Some("Project"), Some(title)) if !title.is_empty() => title.to_string(),
        _ => "Untitled Project".to_string(),
    };

    let timeline = doc.section("Timeline").and_then(|body| {
        let start = dash_value(body, "Start").map(str::to_string);
        let end = dash_value(body, "End").map(str::to_string);
        if start.is_none() && end.is_none() {
            None
        } else {
            Some(Timeline { start, end })
        }
    });

    let team_capacity = doc.section("Team Capacity").and_then(|body| {
        let total = dash_value(body, "Total").map(|v| leading_number(Some(v)));
        let available = dash_value(body, "Available").map(|v| leading_number(Some(v)));
        if total.is_none() && available.is_none() {
            None
        } else {
            Some(TeamCapacity { total, available })
        }
    });

    Project {
        name,
        overview: trimmed_section(&doc, "Overview"),
        timeline,
        team_capacity,
    }
}

/// Decode the singleton team.md. Members are `### Name` blocks; capacity
/// defaults to 40 hours/week and current load to 0 when the lines are
/// absent.
pub fn decode_team(text: &str) -> Team {
    let mut members = Vec::new();
    let mut current: Option<TeamMember> = None;

    for line in text.lines() {
        if let Some(name) = line.strip_prefix("### ") {
            if let Some(member) = current.take() {
                members.push(member);
            }
            current = Some(TeamMember::new(name.trim(), 40.0));
            continue;
        }
        let Some(member) = current.as_mut() else {
            continue;
        };
        if let Some((key, value)) = metadata_line(line) {
            match key {
                "Skills" => member.skills = comma_list(value),
                // unparsable values keep the defaults (40 and 0)
                "Capacity" => {
                    let hours = leading_number(Some(value));
                    if hours > 0.0 {
                        member.capacity = hours;
                    }
                }
                "Current Load" => {
                    let hours = leading_number(Some(value));
                    if hours >= 0.0 {
                        member.current_load = hours;
                    }
                }
                _ => {}
            }
        }
    }
    if let Some(member) = current.take() {
        members.push(member);
    }

    Team { members }
}

/// Parse a status-like metadata value: absent means the default variant,
/// present but unrecognized is a schema violation.
fn status_meta<T>(doc: &Document, key: &str) -> Result<T>
where
    T: FromStr + Default,
{
    match doc.meta(key) {
        None => Ok(T::default()),
        Some(value) => value
            .parse()
            .map_err(|_| Error::schema(key, value, "value outside the allowed set")),
    }
}

fn trimmed_section(doc: &Document, name: &str) -> Option<String> {
    let body = doc.section(name)?.trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

/// Extract FEAT ids from a checkbox list; item text past the id (titles,
/// punctuation) is ignored, and non-FEAT items are skipped.
fn checkbox_feature_ids(body: &str) -> Vec<String> {
    checkbox_items(body)
        .into_iter()
        .filter_map(|item| {
            let token = item
                .text
                .split([':', ' '])
                .next()
                .unwrap_or("")
                .trim_end_matches(|c: char| !c.is_ascii_digit());
            if EntityKind::Feature.matches(token) {
                Some(token.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Parse `- [ ] STORY-NNN: Title (Nh)` items. Items that do not carry the
/// id/title/estimate shape are skipped rather than failing the feature.
fn story_items(body: &str, feature_id: &str) -> Vec<UserStory> {
    checkbox_items(body)
        .into_iter()
        .filter_map(|item| {
            let (id, rest) = item.text.split_once(':')?;
            let id = id.trim();
            if !EntityKind::Story.matches(id) {
                return None;
            }
            let rest = rest.trim();
            let open = rest.rfind('(')?;
            let estimate: u32 = rest[open + 1..].strip_suffix("h)")?.parse().ok()?;
            let title = rest[..open].trim();
            if title.is_empty() {
                return None;
            }
            Some(UserStory {
                id: id.to_string(),
                title: title.to_string(),
                estimate,
                status: if item.checked {
                    WorkStatus::Done
                } else {
                    WorkStatus::Todo
                },
                feature_id: feature_id.to_string(),
            })
        })
        .collect()
}

/// First `- <label>: v1, v2` line in a dependencies body, label matched
/// case-insensitively, values filtered to the FEAT pattern
fn dependency_targets(body: &str, label: &str) -> Vec<String> {
    let pattern = format!("{}:", label);
    for line in body.lines() {
        let rest = match line.trim_start().strip_prefix('-') {
            Some(r) => r.trim_start(),
            None => continue,
        };
        let head = match rest.get(..pattern.len()) {
            Some(h) => h,
            None => continue,
        };
        if !head.eq_ignore_ascii_case(&pattern) {
            continue;
        }
        return comma_list(&rest[pattern.len()..])
            .into_iter()
            .filter(|id| EntityKind::Feature.matches(id))
            .collect();
    }
    Vec::new()
}

/// `- Label: value` line (plain dash list, no bold markers)
fn dash_value<'a>(body: &'a str, label: &str) -> Option<&'a str> {
    for line in body.lines() {
        let rest = match line.trim_start().strip_prefix('-') {
            Some(r) => r.trim_start(),
            None => continue,
        };
        if let Some(value) = rest.strip_prefix(label).and_then(|r| r.strip_prefix(':')) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}
