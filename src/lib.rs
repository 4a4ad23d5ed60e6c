//! pmspec: project-management entities as human-editable markdown
//!
//! Epics, features, user stories, milestones, and the team roster live as
//! plain markdown files that people edit by hand and tools read back. The
//! crate is the schema-on-read core behind that layout: a typed entity
//! model, a tolerant line-oriented codec with a canonical encoder, a
//! cross-entity integrity validator, and the file-backed store that ties
//! them together. The CLI, web backend, and workload analysis are separate
//! collaborators built on these APIs.

pub mod codec;
pub mod core;
pub mod entities;
pub mod store;
pub mod validate;

pub use codec::{
    decode_epic, decode_feature, decode_milestone, decode_project, decode_team, encode_epic,
    encode_feature, encode_milestone, encode_project, encode_team,
};
pub use crate::core::{next_id, sequence_number, EntityKind, Error, Result, Team, TeamMember};
pub use entities::{
    Dependency, DependencyKind, Epic, EpicStatus, Feature, Milestone, MilestoneStatus, Project,
    TeamCapacity, Timeline, UserStory, WorkStatus,
};
pub use store::{
    entity_filename, find_entity_file, load_epics, load_features, load_milestones, read_epic,
    read_feature, read_milestone, read_project, read_team, write_epic, write_feature,
    write_milestone, write_project, write_team, LoadOutcome,
};
pub use validate::{
    check_duplicate_ids, detect_dependency_cycles, format_report, validate_dependencies,
    validate_project, validate_references, Issue, Level, ValidationReport,
};
