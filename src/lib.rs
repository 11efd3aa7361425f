//! Rotation and assignment scheduling for multi-track training courses.
//!
//! A course day is a list of subjects. Most are plain timetable entries;
//! three kinds split the participants and need a generated schedule:
//!
//! - **Workshop rotations**: groups rotate through parallel workshops.
//! - **Practicals**: groups rotate through scenario stations (Latin square).
//! - **Assessments**: candidate pairs rotate through stations in two phases
//!   while the other cohort attends a concurrent activity.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `GroupSet`, `RotationSchedule`,
//!   `AssessmentSchedule`, clock helpers
//! - **`planner`**: Deterministic rotation and assessment planners
//! - **`validation`**: Form and cross-subject checks run before planning
//! - **`course`**: `CoursePlanner`, the validate-plan-persist entry point
//! - **`store`**: `SubjectStore` boundary and an in-memory implementation
//! - **`error`**: `PlanError`
//!
//! # Logging
//!
//! Planners and the course planner emit `tracing` events (`debug!` for
//! generated schedules, `warn!` for refusals, `info!` for commits). The
//! crate installs no subscriber.
//!
//! # References
//!
//! - Colbourn & Dinitz (2007), "Handbook of Combinatorial Designs"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod course;
pub mod error;
pub mod models;
pub mod planner;
pub mod store;
pub mod validation;

pub use course::CoursePlanner;
pub use error::{PlanError, Result};
