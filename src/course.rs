//! Course-level planning: validate, plan, persist.
//!
//! [`CoursePlanner`] is the single entry point used by both the form's
//! live preview and its save action, so the two can never disagree about
//! the schedule a subject produces.
//!
//! # Flow
//!
//! 1. Validate the subject against the course's other subjects.
//! 2. Refuse if any blocking finding exists (or any finding, when strict).
//! 3. Run the planner matching the subject type.
//! 4. On commit, attach the plan and create or update the record.

use tracing::{debug, info, warn};

use crate::error::{PlanError, Result};
use crate::models::{Subject, SubjectPlan, SubjectType};
use crate::planner::{plan_assessment_slots, plan_group_rotation, plan_station_rotation};
use crate::store::SubjectStore;
use crate::validation::{has_blocking_errors, validate_subject, ValidationError};

/// Validates and plans subjects for a course.
///
/// # Example
///
/// ```
/// use course_rotation::course::CoursePlanner;
/// use course_rotation::models::{Subject, SubjectPlan, SubjectType};
/// use course_rotation::store::{MemoryStore, SubjectStore};
///
/// let mut store = MemoryStore::new();
/// let subject = Subject::new("w1", "Skills", SubjectType::WorkshopRotation)
///     .on_day(1)
///     .with_times("10:00", "11:00")
///     .with_workshops(["Airway", "Defib"], 2, 30);
///
/// let saved = CoursePlanner::new().commit(&mut store, "als-2026", subject).unwrap();
/// assert!(matches!(saved.plan, Some(SubjectPlan::GroupRotation(_))));
/// assert_eq!(store.list("als-2026").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoursePlanner {
    strict: bool,
}

impl CoursePlanner {
    /// Creates a planner that lets warnings through.
    pub fn new() -> Self {
        Self::default()
    }

    /// When strict, warnings block planning as well.
    pub fn with_strict_warnings(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Runs the planner for the subject's type, without validation.
    ///
    /// # Errors
    /// [`PlanError::NotPlannable`] for types without a schedule; planner
    /// errors for invalid configurations.
    pub fn plan(&self, subject: &Subject) -> Result<SubjectPlan> {
        match subject.subject_type {
            Some(SubjectType::WorkshopRotation) => {
                plan_group_rotation(&subject.rotation_configuration()).map(SubjectPlan::GroupRotation)
            }
            Some(SubjectType::Practical) => Ok(SubjectPlan::StationRotation(plan_station_rotation(
                &subject.rotation_configuration(),
            ))),
            Some(SubjectType::Assessment) => {
                plan_assessment_slots(&subject.assessment_configuration()).map(SubjectPlan::Assessment)
            }
            Some(other) => Err(PlanError::NotPlannable(other.to_string())),
            None => Err(PlanError::NotPlannable("unspecified".into())),
        }
    }

    /// Validates against `existing` and plans, without persisting.
    ///
    /// Returns `Ok(None)` for valid subjects that have no schedule.
    pub fn preview(&self, subject: &Subject, existing: &[Subject]) -> Result<Option<SubjectPlan>> {
        self.check(subject, existing)?;
        self.plan_if_plannable(subject)
    }

    /// Validates against the stored course, plans, and saves the subject.
    ///
    /// Creates the record if its id is new, otherwise replaces it. Returns
    /// the saved subject with its plan attached.
    pub fn commit<S: SubjectStore>(
        &self,
        store: &mut S,
        course_id: &str,
        mut subject: Subject,
    ) -> Result<Subject> {
        let existing = store.list(course_id)?;
        self.check(&subject, &existing)?;
        subject.plan = self.plan_if_plannable(&subject)?;

        if store.contains(course_id, &subject.id)? {
            store.update(course_id, subject.clone())?;
        } else {
            store.create(course_id, subject.clone())?;
        }
        info!(
            course = course_id,
            subject = %subject.id,
            planned = subject.plan.is_some(),
            "committed subject"
        );
        Ok(subject)
    }

    /// Marks a stored subject deleted so it no longer takes part in clash checks.
    pub fn soft_delete<S: SubjectStore>(
        &self,
        store: &mut S,
        course_id: &str,
        subject_id: &str,
    ) -> Result<()> {
        let mut subject = store.get(course_id, subject_id)?;
        subject.deleted = true;
        store.update(course_id, subject)?;
        debug!(course = course_id, subject = subject_id, "soft-deleted subject");
        Ok(())
    }

    fn check(&self, subject: &Subject, existing: &[Subject]) -> Result<()> {
        let findings = validate_subject(subject, existing);
        let blocked = if self.strict {
            !findings.is_empty()
        } else {
            has_blocking_errors(&findings)
        };

        if blocked {
            warn!(
                subject = %subject.id,
                findings = findings.len(),
                "subject refused by validation"
            );
            return Err(PlanError::Validation(messages(findings)));
        }
        for warning in &findings {
            warn!(subject = %subject.id, "{}", warning.message);
        }
        Ok(())
    }

    fn plan_if_plannable(&self, subject: &Subject) -> Result<Option<SubjectPlan>> {
        match self.plan(subject) {
            Ok(plan) => Ok(Some(plan)),
            Err(PlanError::NotPlannable(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn messages(findings: Vec<ValidationError>) -> Vec<String> {
    findings.into_iter().map(|f| f.message).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::MemoryStore;

    fn lecture(id: &str, start: &str, end: &str) -> Subject {
        Subject::new(id, format!("Lecture {id}"), SubjectType::Lecture)
            .on_day(1)
            .with_times(start, end)
    }

    fn practical() -> Subject {
        Subject::new("p1", "Scenarios", SubjectType::Practical)
            .on_day(1)
            .with_times("09:00", "10:00")
            .with_stations(["Bay 1", "Bay 2"], 2, 30)
    }

    fn assessment() -> Subject {
        Subject::new("a1", "Final assessment", SubjectType::Assessment)
            .on_day(2)
            .with_times("13:00", "14:30")
            .with_stations(["Cardiac arrest", "Sepsis", "Anaphylaxis", "Trauma"], 4, 0)
            .with_assessment(15, 20, "Skills review")
    }

    #[test]
    fn test_preview_practical() {
        let plan = CoursePlanner::new().preview(&practical(), &[]).unwrap();
        let Some(SubjectPlan::StationRotation(schedule)) = plan else {
            panic!("expected a station rotation");
        };
        assert_eq!(schedule.round_count(), 2);
        assert_eq!(schedule.rounds[0].sessions[0].groups.len(), 2);
        assert_eq!(schedule.rounds[0].time_window, "09:00-09:30");
        assert_eq!(schedule.rounds[1].time_window, "09:30-10:00");
    }

    #[test]
    fn test_preview_lecture_has_no_plan() {
        let plan = CoursePlanner::new()
            .preview(&lecture("l1", "08:00", "09:00"), &[])
            .unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn test_preview_refuses_invalid() {
        let subject = assessment().with_assessment(15, 20, "");
        let err = CoursePlanner::new().preview(&subject, &[]).unwrap_err();
        let PlanError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert!(messages.iter().any(|m| m.contains("concurrent activity")));
    }

    #[test]
    fn test_commit_creates_then_updates() {
        let mut store = MemoryStore::new();
        let planner = CoursePlanner::new();

        let saved = planner.commit(&mut store, "c1", assessment()).unwrap();
        let Some(SubjectPlan::Assessment(schedule)) = &saved.plan else {
            panic!("expected an assessment plan");
        };
        assert_eq!(schedule.candidate_assignments().len(), 32);
        assert_eq!(
            schedule.slots[0].stations[0].candidate_assignments[0].role,
            Role::Lead
        );

        let edited = assessment().with_assessment(10, 20, "Skills review");
        planner.commit(&mut store, "c1", edited).unwrap();
        assert_eq!(store.subject_count("c1"), 1);
        let stored = store.get("c1", "a1").unwrap();
        assert_eq!(stored.lead_assist_duration, 10);
        let Some(SubjectPlan::Assessment(schedule)) = stored.plan else {
            panic!("expected an assessment plan");
        };
        assert_eq!(schedule.slots[1].start_time, "13:10");
    }

    #[test]
    fn test_commit_refuses_stale_station_names() {
        let mut store = MemoryStore::new();
        let mut subject = assessment();
        subject.station_names.push("Burns".into());
        let err = CoursePlanner::new()
            .commit(&mut store, "c1", subject)
            .unwrap_err();
        let PlanError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(messages, vec!["5 station names given for 4 stations"]);
        assert_eq!(store.subject_count("c1"), 0);
    }

    #[test]
    fn test_commit_refuses_conflict() {
        let mut store = MemoryStore::new();
        let planner = CoursePlanner::new();
        planner
            .commit(&mut store, "c1", lecture("l1", "09:00", "10:00"))
            .unwrap();
        let late = practical().with_times("09:30", "10:30");
        let err = planner.commit(&mut store, "c1", late).unwrap_err();
        assert!(matches!(err, PlanError::Validation(_)));
        assert_eq!(store.subject_count("c1"), 1);
    }

    #[test]
    fn test_soft_delete_frees_the_slot() {
        let mut store = MemoryStore::new();
        let planner = CoursePlanner::new();
        planner
            .commit(&mut store, "c1", lecture("l1", "09:00", "10:00"))
            .unwrap();
        let late = practical().with_times("09:30", "10:30");
        assert!(planner.commit(&mut store, "c1", late.clone()).is_err());
        planner.soft_delete(&mut store, "c1", "l1").unwrap();
        assert!(planner.commit(&mut store, "c1", late).is_ok());
        assert!(store.get("c1", "l1").unwrap().deleted);
    }

    #[test]
    fn test_strict_blocks_warnings() {
        let mut store = MemoryStore::new();
        let planner = CoursePlanner::new();
        planner
            .commit(&mut store, "c1", lecture("l1", "09:00", "10:00"))
            .unwrap();

        let twin = lecture("l2", "09:00", "10:00");
        let strict = CoursePlanner::new().with_strict_warnings(true);
        assert!(strict.commit(&mut store, "c1", twin.clone()).is_err());
        assert!(planner.commit(&mut store, "c1", twin).is_ok());
    }

    #[test]
    fn test_plan_rejects_lecture() {
        let err = CoursePlanner::new()
            .plan(&lecture("l1", "09:00", "10:00"))
            .unwrap_err();
        assert_eq!(err, PlanError::NotPlannable("lecture".into()));
    }
}
