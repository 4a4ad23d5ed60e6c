//! Entity definitions - the typed schema every decode and construction
//! path must satisfy

pub mod epic;
pub mod feature;
pub mod milestone;
pub mod project;

pub use epic::{Epic, EpicStatus};
pub use feature::{Dependency, DependencyKind, Feature, UserStory, WorkStatus};
pub use milestone::{Milestone, MilestoneStatus};
pub use project::{Project, TeamCapacity, Timeline};
