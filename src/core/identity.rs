//! Sequential entity identifiers of the form `PREFIX-NNN`
//!
//! IDs carry a type prefix and a zero-padded sequence number. Allocation is
//! strictly `max + 1` over the existing numbers: gaps left by deletions are
//! never reused, because a reissued number could collide with files created
//! outside this tool (export/import, manual copies).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::Error;

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    /// Epic (EPIC-NNN)
    Epic,
    /// Feature (FEAT-NNN)
    Feature,
    /// User story, owned by a feature (STORY-NNN)
    Story,
    /// Milestone (MILE-NNN, exactly three digits)
    Milestone,
}

impl EntityKind {
    /// Get the string representation of the prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Epic => "EPIC",
            EntityKind::Feature => "FEAT",
            EntityKind::Story => "STORY",
            EntityKind::Milestone => "MILE",
        }
    }

    /// Get all entity kinds
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Epic,
            EntityKind::Feature,
            EntityKind::Story,
            EntityKind::Milestone,
        ]
    }

    /// Check an ID string against this kind's pattern.
    ///
    /// Milestone IDs require exactly three digits after the prefix; the
    /// other kinds accept any non-empty digit suffix so numbering can grow
    /// past 999.
    pub fn matches(&self, id: &str) -> bool {
        let digits = match id
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix('-'))
        {
            Some(d) => d,
            None => return false,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match self {
            EntityKind::Milestone => digits.len() == 3,
            _ => true,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EPIC" => Ok(EntityKind::Epic),
            "FEAT" => Ok(EntityKind::Feature),
            "STORY" => Ok(EntityKind::Story),
            "MILE" => Ok(EntityKind::Milestone),
            _ => Err(Error::MalformedId { id: s.to_string() }),
        }
    }
}

/// Extract the trailing sequence number after the last `-`.
///
/// `sequence_number("EPIC-001")` is `1`. Fails with `MalformedId` when no
/// digit suffix exists.
pub fn sequence_number(id: &str) -> crate::core::error::Result<u64> {
    let (_, digits) = id.rsplit_once('-').ok_or_else(|| Error::MalformedId {
        id: id.to_string(),
    })?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedId { id: id.to_string() });
    }
    digits.parse().map_err(|_| Error::MalformedId {
        id: id.to_string(),
    })
}

/// Allocate the next available ID for a prefix.
///
/// Returns `PREFIX-001` when `existing` is empty, otherwise `max + 1`
/// zero-padded to at least three digits (the width grows past 999 without
/// truncation, e.g. `X-999` is followed by `X-1000`). IDs in `existing`
/// that carry no digit suffix are skipped rather than failing the
/// allocation, so one stray file cannot block creating new entities.
pub fn next_id<S: AsRef<str>>(prefix: &str, existing: &[S]) -> String {
    let max = existing
        .iter()
        .filter_map(|id| sequence_number(id.as_ref()).ok())
        .max();
    match max {
        None => format!("{}-001", prefix),
        Some(n) => format!("{}-{:03}", prefix, n + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_number() {
        assert_eq!(sequence_number("EPIC-001").unwrap(), 1);
        assert_eq!(sequence_number("STORY-042").unwrap(), 42);
        assert_eq!(sequence_number("X-1000").unwrap(), 1000);
    }

    #[test]
    fn test_sequence_number_malformed() {
        assert!(matches!(
            sequence_number("EPIC").unwrap_err(),
            Error::MalformedId { .. }
        ));
        assert!(sequence_number("EPIC-").is_err());
        assert!(sequence_number("EPIC-abc").is_err());
    }

    #[test]
    fn test_next_id_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(next_id("EPIC", &empty), "EPIC-001");
    }

    #[test]
    fn test_next_id_monotonic() {
        assert_eq!(next_id("EPIC", &["EPIC-001", "EPIC-003"]), "EPIC-004");
    }

    #[test]
    fn test_next_id_tolerates_gaps() {
        // deleted EPIC-002 is never reissued
        assert_eq!(next_id("EPIC", &["EPIC-001", "EPIC-005"]), "EPIC-006");
    }

    #[test]
    fn test_next_id_padding_growth() {
        assert_eq!(next_id("STORY", &["STORY-099"]), "STORY-100");
        assert_eq!(next_id("X", &["X-999"]), "X-1000");
    }

    #[test]
    fn test_next_id_skips_malformed() {
        assert_eq!(next_id("FEAT", &["FEAT-002", "notes"]), "FEAT-003");
        assert_eq!(next_id("FEAT", &["junk"]), "FEAT-001");
    }

    #[test]
    fn test_kind_patterns() {
        assert!(EntityKind::Epic.matches("EPIC-001"));
        assert!(EntityKind::Epic.matches("EPIC-1000"));
        assert!(!EntityKind::Epic.matches("EPIC-"));
        assert!(!EntityKind::Epic.matches("FEAT-001"));
        assert!(!EntityKind::Epic.matches("EPIC-12a"));
        assert!(EntityKind::Milestone.matches("MILE-003"));
        assert!(!EntityKind::Milestone.matches("MILE-1000"));
        assert!(!EntityKind::Milestone.matches("MILE-01"));
    }

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in EntityKind::all() {
            let parsed: EntityKind = kind.prefix().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
        assert!("XXX".parse::<EntityKind>().is_err());
    }
}
