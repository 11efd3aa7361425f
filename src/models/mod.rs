//! Course scheduling domain models.
//!
//! Provides the configuration and schedule types exchanged with the record
//! store and the course form, plus the clock arithmetic they share.
//!
//! # Domain Mappings
//!
//! | course-rotation | Workshop rotation | Practical | Assessment |
//! |-----------------|-------------------|-----------|------------|
//! | Sub-activity | Workshop | Station | Station |
//! | Round | Rotation round | Time slot | Time slot |
//! | Occupant | Group | Group | Candidate pair |

pub mod clock;
mod assessment;
mod group;
mod rotation;
mod subject;

pub use assessment::{
    derive_candidate_assignments, derive_candidate_pairs, AssessmentConfiguration,
    AssessmentSchedule, AssessmentTimeSlot, CandidateAssignment, CandidatePair, CandidateRange,
    ConcurrentActivity, Phase, Role, SeatAssignment, StationAssignment,
};
pub use clock::{compute_slot_window, TimeWindow};
pub use group::{GroupId, GroupSet};
pub use rotation::{Round, RotationConfiguration, RotationSchedule, Session};
pub use subject::{Subject, SubjectPlan, SubjectType};
