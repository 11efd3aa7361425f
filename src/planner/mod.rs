//! Rotation and assessment planners.
//!
//! Each planner is a pure function from a configuration to a schedule:
//! no I/O, no clock access, no randomness. Identical input gives identical
//! output, so callers may retry or diff freely.
//!
//! | Planner | Input | Output |
//! |---------|-------|--------|
//! | [`plan_group_rotation`] | workshops × rounds | [`RotationSchedule`](crate::models::RotationSchedule) |
//! | [`plan_station_rotation`] | stations × time slots | [`RotationSchedule`](crate::models::RotationSchedule) |
//! | [`plan_assessment_slots`] | stations × phased slots | [`AssessmentSchedule`](crate::models::AssessmentSchedule) |
//!
//! # References
//!
//! - Colbourn & Dinitz (2007), "Handbook of Combinatorial Designs"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

mod assessment;
mod claims;
mod group_rotation;
mod station_rotation;

pub use assessment::plan_assessment_slots;
pub use group_rotation::plan_group_rotation;
pub use station_rotation::plan_station_rotation;
