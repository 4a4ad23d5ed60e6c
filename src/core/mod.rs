//! Core module - identifiers, errors, and the team roster

pub mod error;
pub mod identity;
pub mod team;

pub use error::{Error, Result};
pub use identity::{next_id, sequence_number, EntityKind};
pub use team::{Team, TeamMember};
