//! Integrity validation across a decoded project snapshot
//!
//! The validator is a pure function over the entities it is handed: it
//! never touches the filesystem, never mutates its inputs, and never
//! returns an `Err`. An invalid project is an expected outcome, reported
//! as a list of issues, not an exceptional one.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::core::team::Team;
use crate::entities::{Epic, Feature};

/// Issue severity. Only errors make a project invalid; warnings are
/// advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Error,
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub level: Level,
    pub message: String,
    /// Entity ID the issue is anchored to, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Issue {
    fn error(message: impl Into<String>) -> Self {
        Issue {
            level: Level::Error,
            message: message.into(),
            location: None,
        }
    }

    fn error_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Issue {
            level: Level::Error,
            message: message.into(),
            location: Some(location.into()),
        }
    }

    fn warning_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Issue {
            level: Level::Warning,
            message: message.into(),
            location: Some(location.into()),
        }
    }
}

/// Outcome of validating a project snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.level == Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.level == Level::Warning)
    }
}

/// Detect IDs used more than once across epics, features, and the stories
/// nested in features, all in one namespace. Each repeat occurrence is
/// reported once (two files sharing an ID yield one error, three yield
/// two).
pub fn check_duplicate_ids(epics: &[Epic], features: &[Feature]) -> Vec<String> {
    let mut all_ids: Vec<&str> = Vec::new();
    for epic in epics {
        all_ids.push(&epic.id);
    }
    for feature in features {
        all_ids.push(&feature.id);
        for story in &feature.user_stories {
            all_ids.push(&story.id);
        }
    }

    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for id in all_ids {
        if !seen.insert(id) {
            errors.push(format!("Duplicate ID found: {}", id));
        }
    }
    errors
}

/// Check referential integrity in both directions: every feature's epic
/// must exist, and every feature listed by an epic must exist. A one-sided
/// dangling reference is still caught.
pub fn validate_references(epics: &[Epic], features: &[Feature]) -> Vec<String> {
    let epic_ids: HashSet<&str> = epics.iter().map(|e| e.id.as_str()).collect();
    let feature_ids: HashSet<&str> = features.iter().map(|f| f.id.as_str()).collect();

    let mut errors = Vec::new();
    for feature in features {
        if !epic_ids.contains(feature.epic_id.as_str()) {
            errors.push(format!(
                "Feature {} references non-existent Epic {}",
                feature.id, feature.epic_id
            ));
        }
    }
    for epic in epics {
        for feature_id in &epic.features {
            if !feature_ids.contains(feature_id.as_str()) {
                errors.push(format!(
                    "Epic {} references non-existent Feature {}",
                    epic.id, feature_id
                ));
            }
        }
    }
    errors
}

/// Check that dependency targets exist and that no feature depends on
/// itself
pub fn validate_dependencies(features: &[Feature]) -> Vec<String> {
    let feature_ids: HashSet<&str> = features.iter().map(|f| f.id.as_str()).collect();

    let mut errors = Vec::new();
    for feature in features {
        for dep in &feature.dependencies {
            if !feature_ids.contains(dep.feature_id.as_str()) {
                errors.push(format!(
                    "Feature {} has dependency on non-existent Feature {}",
                    feature.id, dep.feature_id
                ));
            }
            if dep.feature_id == feature.id {
                errors.push(format!(
                    "Feature {} has a self-referencing dependency",
                    feature.id
                ));
            }
        }
    }
    errors
}

/// Find cycles among `blocks` dependencies (relates-to edges are
/// informational and never form a scheduling cycle). Depth-first search;
/// each cycle is reported as the path that closes it.
pub fn detect_dependency_cycles(features: &[Feature]) -> Vec<Vec<String>> {
    let by_id: HashMap<&str, &Feature> = features.iter().map(|f| (f.id.as_str(), f)).collect();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut cycles: Vec<Vec<String>> = Vec::new();

    fn dfs<'a>(
        id: &'a str,
        by_id: &HashMap<&'a str, &'a Feature>,
        visited: &mut HashSet<&'a str>,
        stack: &mut Vec<&'a str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        if let Some(pos) = stack.iter().position(|&s| s == id) {
            let mut cycle: Vec<String> = stack[pos..].iter().map(|s| s.to_string()).collect();
            cycle.push(id.to_string());
            cycles.push(cycle);
            return;
        }
        if !visited.insert(id) {
            return;
        }
        stack.push(id);
        if let Some(feature) = by_id.get(id) {
            for target in feature.blocking_dependencies() {
                if by_id.contains_key(target) {
                    dfs(target, by_id, visited, stack, cycles);
                }
            }
        }
        stack.pop();
    }

    for feature in features {
        if !visited.contains(feature.id.as_str()) {
            let mut stack = Vec::new();
            dfs(&feature.id, &by_id, &mut visited, &mut stack, &mut cycles);
        }
    }
    cycles
}

/// Validate a full project snapshot. Checks, in order: duplicate IDs,
/// two-way referential integrity, numeric sanity, skill coverage (warning
/// only, and only when a team is supplied), dependency targets, and
/// blocking-dependency cycles. `valid` means no error-level issue.
pub fn validate_project(epics: &[Epic], features: &[Feature], team: Option<&Team>) -> ValidationReport {
    let mut issues: Vec<Issue> = Vec::new();

    for message in check_duplicate_ids(epics, features) {
        issues.push(Issue::error(message));
    }

    for message in validate_references(epics, features) {
        issues.push(Issue::error(message));
    }

    // Construction already rejects these, so they mainly catch entities
    // built by tolerant decode without a store read.
    for epic in epics {
        if epic.estimate <= 0.0 {
            issues.push(Issue::error_at(
                format!("Epic {} has invalid estimate: {}", epic.id, epic.estimate),
                &epic.id,
            ));
        }
        if epic.actual < 0.0 {
            issues.push(Issue::error_at(
                format!("Epic {} has negative actual hours: {}", epic.id, epic.actual),
                &epic.id,
            ));
        }
    }
    for feature in features {
        if feature.estimate <= 0.0 {
            issues.push(Issue::error_at(
                format!(
                    "Feature {} has invalid estimate: {}",
                    feature.id, feature.estimate
                ),
                &feature.id,
            ));
        }
        if feature.actual < 0.0 {
            issues.push(Issue::error_at(
                format!(
                    "Feature {} has negative actual hours: {}",
                    feature.id, feature.actual
                ),
                &feature.id,
            ));
        }
    }

    if let Some(team) = team {
        let team_skills = team.skill_union();
        for feature in features {
            let missing: Vec<&str> = feature
                .skills_required
                .iter()
                .filter(|skill| !team_skills.contains(&skill.to_lowercase()))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                issues.push(Issue::warning_at(
                    format!(
                        "Feature {} requires skills not in team: {}",
                        feature.id,
                        missing.join(", ")
                    ),
                    &feature.id,
                ));
            }
        }
    }

    for message in validate_dependencies(features) {
        issues.push(Issue::error(message));
    }

    for cycle in detect_dependency_cycles(features) {
        issues.push(Issue::error(format!(
            "Circular dependency detected: {}",
            cycle.join(" -> ")
        )));
    }

    let valid = !issues.iter().any(|i| i.level == Level::Error);
    ValidationReport { valid, issues }
}

/// Render a report for terminal display: errors first, then warnings, each
/// with its location when known
pub fn format_report(report: &ValidationReport) -> String {
    if report.valid && report.issues.is_empty() {
        return "All validations passed".to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let errors: Vec<&Issue> = report.errors().collect();
    let warnings: Vec<&Issue> = report.warnings().collect();

    if !errors.is_empty() {
        lines.push(format!("{} ERROR(S):", errors.len()));
        for issue in errors {
            lines.push(issue_line(issue));
        }
    }
    if !warnings.is_empty() {
        lines.push(format!("{} WARNING(S):", warnings.len()));
        for issue in warnings {
            lines.push(issue_line(issue));
        }
    }
    lines.join("\n")
}

fn issue_line(issue: &Issue) -> String {
    match &issue.location {
        Some(location) => format!("  - {} [{}]", issue.message, location),
        None => format!("  - {}", issue.message),
    }
}
