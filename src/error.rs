//! Error types for planning and subject storage.
//!
//! Validation problems are not errors in this sense: the validator returns
//! a list of [`ValidationError`](crate::validation::ValidationError)s. A
//! [`PlanError`] is raised only when a planner is handed a configuration it
//! cannot plan, when a commit is refused, or when the store rejects a call.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors surfaced by planners, the course planner and subject stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A planner received a configuration it cannot turn into a schedule.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A group identifier appears more than once in a group set.
    #[error("duplicate group '{0}'")]
    DuplicateGroup(String),

    /// The subject failed validation and was not planned.
    #[error("subject failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The subject has no planner (e.g. a lecture or break).
    #[error("subject type '{0}' has no schedule to plan")]
    NotPlannable(String),

    /// The store holds no subject with this id in this course.
    #[error("subject '{subject_id}' not found in course '{course_id}'")]
    SubjectNotFound {
        course_id: String,
        subject_id: String,
    },

    /// The store already holds a subject with this id in this course.
    #[error("subject '{subject_id}' already exists in course '{course_id}'")]
    DuplicateSubject {
        course_id: String,
        subject_id: String,
    },
}

impl PlanError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Whether retrying with a corrected configuration could succeed.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_) | Self::DuplicateGroup(_) | Self::Validation(_)
        )
    }
}
