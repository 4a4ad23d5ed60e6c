//! End-to-end tests over a real project data directory

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use pmspec::{
    decode_epic, entity_filename, load_epics, load_features, next_id, read_epic, read_feature,
    read_milestone, read_project, read_team, validate_project, write_epic, write_feature,
    write_milestone, write_project, write_team, Dependency, DependencyKind, Epic, EpicStatus,
    Feature, Level, Milestone, Project, Team, TeamCapacity, TeamMember, Timeline, UserStory,
    WorkStatus,
};

fn sample_team() -> Team {
    Team {
        members: vec![
            TeamMember {
                name: "Alice".to_string(),
                skills: vec!["TypeScript".to_string(), "React".to_string()],
                capacity: 40.0,
                current_load: 25.0,
            },
            TeamMember {
                name: "Bob".to_string(),
                skills: vec!["Rust".to_string()],
                capacity: 30.0,
                current_load: 10.0,
            },
        ],
    }
}

fn sample_project_tree(root: &Path) {
    let mut epic = Epic::new("EPIC-001", "User Authentication", 80.0);
    epic.status = EpicStatus::InProgress;
    epic.owner = Some("Alice".to_string());
    epic.description = Some("Build a complete authentication system.".to_string());
    epic.features = vec!["FEAT-001".to_string(), "FEAT-002".to_string()];
    write_epic(&root.join("epics").join(entity_filename(&epic.id)), &epic).unwrap();

    let mut login = Feature::new("FEAT-001", "Login form", "EPIC-001", 16.0);
    login.assignee = Some("Alice".to_string());
    login.skills_required = vec!["TypeScript".to_string(), "React".to_string()];
    login.user_stories = vec![
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
    ];
    login.acceptance_criteria = vec!["Session cookie is set".to_string()];
    write_feature(&root.join("features").join(entity_filename(&login.id)), &login).unwrap();

    let mut signup = Feature::new("FEAT-002", "Signup form", "EPIC-001", 24.0);
    signup.dependencies = vec![Dependency {
        feature_id: "FEAT-001".to_string(),
        kind: DependencyKind::Blocks,
    }];
    write_feature(&root.join("features").join(entity_filename(&signup.id)), &signup).unwrap();

    let mut beta = Milestone::new("MILE-001", "Beta launch", "2026-03-01");
    beta.features = vec!["FEAT-001".to_string(), "FEAT-002".to_string()];
    write_milestone(&root.join("milestones").join(entity_filename(&beta.id)), &beta).unwrap();

    let mut project = Project::new("Apollo");
    project.overview = Some("Authentication for the Apollo rollout.".to_string());
    project.timeline = Some(Timeline {
        start: Some("2026-01-01".to_string()),
        end: Some("2026-06-30".to_string()),
    });
    project.team_capacity = Some(TeamCapacity {
        total: Some(120.0),
        available: Some(80.0),
    });
    write_project(&root.join("project.md"), &project).unwrap();

    write_team(&root.join("team.md"), &sample_team()).unwrap();
}

#[test]
fn test_full_project_roundtrip_and_validation() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    sample_project_tree(root);

    let epics = load_epics(&root.join("epics")).unwrap();
    let features = load_features(&root.join("features")).unwrap();
    assert!(epics.errors.is_empty());
    assert!(features.errors.is_empty());
    assert_eq!(epics.entities.len(), 1);
    assert_eq!(features.entities.len(), 2);

    let team = read_team(&root.join("team.md")).unwrap();
    let project = read_project(&root.join("project.md")).unwrap();
    assert_eq!(project.name, "Apollo");
    assert_eq!(team.members.len(), 2);

    let milestone = read_milestone(&root.join("milestones").join("mile-001.md")).unwrap();
    assert_eq!(milestone.features.len(), 2);

    let report = validate_project(&epics.entities, &features.entities, Some(&team));
    assert!(report.valid, "unexpected issues: {:?}", report.issues);
    assert!(report.issues.is_empty());
}

#[test]
fn test_reread_preserves_scalar_and_reference_fields() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    sample_project_tree(root);

    let feature = read_feature(&root.join("features").join("feat-001.md")).unwrap();
    assert_eq!(feature.id, "FEAT-001");
    assert_eq!(feature.title, "Login form");
    assert_eq!(feature.epic_id, "EPIC-001");
    assert_eq!(feature.assignee.as_deref(), Some("Alice"));
    assert_eq!(feature.estimate, 16.0);
    assert_eq!(feature.actual, 0.0);
    assert_eq!(feature.user_stories.len(), 2);
    // the checked story survives the trip to disk and back
    assert_eq!(feature.user_stories[0].status, WorkStatus::Done);
    assert_eq!(feature.user_stories[1].status, WorkStatus::Todo);

    let epic = read_epic(&root.join("epics").join("epic-001.md")).unwrap();
    assert_eq!(epic.features, vec!["FEAT-001", "FEAT-002"]);
    assert_eq!(epic.status, EpicStatus::InProgress);
}

#[test]
fn test_hand_edited_epic_decodes() {
    // the exact shape a person writes by hand
    let text = "# Epic: User Authentication\n\
                - **ID**: EPIC-001\n\
                - **Status**: planning\n\
                - **Owner**: Alice\n\
                - **Estimate**: 80 hours\n\
                - **Actual**: 0 hours\n\
                \n\
                ## Description\n\
                Build a complete authentication system.\n\
                \n\
                ## Features\n\
                - [ ] FEAT-001: Login form\n\
                - [ ] FEAT-002: Signup form\n";
    let epic = decode_epic(text).unwrap();
    assert_eq!(epic.id, "EPIC-001");
    assert_eq!(epic.title, "User Authentication");
    assert_eq!(epic.status, EpicStatus::Planning);
    assert_eq!(epic.owner.as_deref(), Some("Alice"));
    assert_eq!(epic.estimate, 80.0);
    assert_eq!(epic.actual, 0.0);
    assert!(epic
        .description
        .as_deref()
        .unwrap()
        .contains("Build a complete authentication system"));
    assert_eq!(epic.features, vec!["FEAT-001", "FEAT-002"]);
}

#[test]
fn test_next_id_over_file_listing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    sample_project_tree(root);

    let features = load_features(&root.join("features")).unwrap();
    let ids: Vec<String> = features.entities.iter().map(|f| f.id.clone()).collect();
    assert_eq!(next_id("FEAT", &ids), "FEAT-003");

    let none_yet: Vec<String> = Vec::new();
    assert_eq!(next_id("MILE", &none_yet), "MILE-001");
}

#[test]
fn test_validation_catches_dangling_references_on_disk() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    sample_project_tree(root);

    // delete a feature file but leave the epic pointing at it
    fs::remove_file(root.join("features").join("feat-002.md")).unwrap();

    let epics = load_epics(&root.join("epics")).unwrap();
    let features = load_features(&root.join("features")).unwrap();
    let report = validate_project(&epics.entities, &features.entities, None);

    assert!(!report.valid);
    assert!(report.issues.iter().any(|i| {
        i.level == Level::Error
            && i.message == "Epic EPIC-001 references non-existent Feature FEAT-002"
    }));
}

#[test]
fn test_skill_gap_reports_warning_but_stays_valid() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    sample_project_tree(root);

    let mut ml = Feature::new("FEAT-003", "Relevance model", "EPIC-001", 40.0);
    ml.skills_required = vec!["Python".to_string()];
    write_feature(&root.join("features").join("feat-003.md"), &ml).unwrap();

    let mut epics = load_epics(&root.join("epics")).unwrap();
    epics.entities[0].features.push("FEAT-003".to_string());
    let features = load_features(&root.join("features")).unwrap();
    let team = read_team(&root.join("team.md")).unwrap();

    let report = validate_project(&epics.entities, &features.entities, Some(&team));
    assert!(report.valid);
    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("Python"));
    assert_eq!(warnings[0].location.as_deref(), Some("FEAT-003"));
}

#[test]
fn test_batch_load_surfaces_per_file_errors() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    sample_project_tree(root);

    // a half-written file a user abandoned mid-edit
    fs::write(
        root.join("features").join("feat-099.md"),
        "# Feature: Unfinished\n\n- **ID**: FEAT-099\n- **Epic**: EPIC-001\n",
    )
    .unwrap();

    let outcome = load_features(&root.join("features")).unwrap();
    assert_eq!(outcome.entities.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].0.ends_with("feat-099.md"));
    assert!(outcome.errors[0].1.to_string().contains("Estimate"));
}

#[test]
fn test_team_singleton_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("team.md");
    let team = sample_team();
    write_team(&path, &team).unwrap();
    let loaded = read_team(&path).unwrap();
    assert_eq!(loaded, team);
    assert!(!loaded.members[0].is_overallocated());
    assert_eq!(loaded.members[1].available_hours(), 20.0);
}
