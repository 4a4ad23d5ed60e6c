//! File-backed entity store
//!
//! The only component that touches the filesystem. Reads run the full
//! schema-on-read pipeline (raw text, tolerant decode, construction
//! checks); writes encode the whole entity and replace the file, creating
//! parent directories as needed. There are no partial-file updates. ID
//! allocation stays with the caller via [`crate::core::next_id`] over the
//! existing file listing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{
    decode_epic, decode_feature, decode_milestone, decode_project, decode_team, encode_epic,
    encode_feature, encode_milestone, encode_project, encode_team,
};
use crate::core::error::{Error, Result};
use crate::core::team::Team;
use crate::entities::{Epic, Feature, Milestone, Project};

/// Filename convention: the lowercased ID plus `.md` (e.g. `epic-001.md`)
pub fn entity_filename(id: &str) -> String {
    format!("{}.md", id.to_lowercase())
}

/// Read and decode an epic file, then apply construction checks
pub fn read_epic(path: &Path) -> Result<Epic> {
    let text = read_text(path)?;
    let epic = decode_epic(&text)?;
    epic.validate()?;
    Ok(epic)
}

/// Read and decode a feature file, then apply construction checks
pub fn read_feature(path: &Path) -> Result<Feature> {
    let text = read_text(path)?;
    let feature = decode_feature(&text)?;
    feature.validate()?;
    Ok(feature)
}

/// Read and decode a milestone file, then apply construction checks
pub fn read_milestone(path: &Path) -> Result<Milestone> {
    let text = read_text(path)?;
    let milestone = decode_milestone(&text)?;
    milestone.validate()?;
    Ok(milestone)
}

/// Read and decode the singleton project.md
pub fn read_project(path: &Path) -> Result<Project> {
    let text = read_text(path)?;
    let project = decode_project(&text);
    project.validate()?;
    Ok(project)
}

/// Read and decode the singleton team.md
pub fn read_team(path: &Path) -> Result<Team> {
    let text = read_text(path)?;
    let team = decode_team(&text);
    team.validate()?;
    Ok(team)
}

pub fn write_epic(path: &Path, epic: &Epic) -> Result<()> {
    write_text(path, &encode_epic(epic))
}

pub fn write_feature(path: &Path, feature: &Feature) -> Result<()> {
    write_text(path, &encode_feature(feature))
}

pub fn write_milestone(path: &Path, milestone: &Milestone) -> Result<()> {
    write_text(path, &encode_milestone(milestone))
}

pub fn write_project(path: &Path, project: &Project) -> Result<()> {
    write_text(path, &encode_project(project))
}

pub fn write_team(path: &Path, team: &Team) -> Result<()> {
    write_text(path, &encode_team(team))
}

/// Entities loaded from a directory plus the files that failed, so batch
/// operations keep going past one bad file instead of aborting
#[derive(Debug)]
pub struct LoadOutcome<T> {
    pub entities: Vec<T>,
    pub errors: Vec<(PathBuf, Error)>,
}

impl<T> Default for LoadOutcome<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Load every epic in a directory (non-recursive, `.md` files only)
pub fn load_epics(dir: &Path) -> Result<LoadOutcome<Epic>> {
    load_dir(dir, read_epic)
}

/// Load every feature in a directory
pub fn load_features(dir: &Path) -> Result<LoadOutcome<Feature>> {
    load_dir(dir, read_feature)
}

/// Load every milestone in a directory
pub fn load_milestones(dir: &Path) -> Result<LoadOutcome<Milestone>> {
    load_dir(dir, read_milestone)
}

/// Find an entity file by ID in a directory. The match is on the file
/// stem, case-insensitive, per the `<lowercased-id>.md` convention.
pub fn find_entity_file(dir: &Path, id: &str) -> Option<PathBuf> {
    let wanted = id.to_lowercase();
    for entry in fs::read_dir(dir).ok()? {
        let path = entry.ok()?.path();
        if path.extension().map_or(false, |e| e == "md") {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if stem.eq_ignore_ascii_case(&wanted) {
                return Some(path);
            }
        }
    }
    None
}

fn load_dir<T>(dir: &Path, read: impl Fn(&Path) -> Result<T>) -> Result<LoadOutcome<T>> {
    let mut outcome = LoadOutcome::default();
    if !dir.exists() {
        return Ok(outcome);
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.extension().map_or(false, |e| e == "md") {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        match read(&path) {
            Ok(entity) => outcome.entities.push(entity),
            Err(err) => outcome.errors.push((path, err)),
        }
    }
    Ok(outcome)
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            io_error(path, e)
        }
    })
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
    }
    fs::write(path, content).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
