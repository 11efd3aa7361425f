//! Subject records.
//!
//! A subject is one timetabled session of a course day, as stored by the
//! record store and edited on the course form. Subjects carry the fields of
//! every session type; only the fields of their own type are meaningful.
//! Planning is driven by converting a subject into a planner configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    clock, AssessmentConfiguration, AssessmentSchedule, CandidateRange, GroupSet,
    RotationConfiguration, RotationSchedule, TimeWindow,
};

/// Session type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubjectType {
    /// Whole-course lecture.
    Lecture,
    /// A single workshop; several may run side by side.
    Workshop,
    /// Groups rotate through several workshops.
    WorkshopRotation,
    /// Groups rotate through practical scenario stations.
    Practical,
    /// Formal assessment with a concurrent activity.
    Assessment,
    /// Break or meal.
    Break,
    /// Anything else.
    Other,
}

impl SubjectType {
    /// Whether subjects of this type may share an identical time window.
    pub fn is_workshop(self) -> bool {
        matches!(self, Self::Workshop | Self::WorkshopRotation)
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lecture => "lecture",
            Self::Workshop => "workshop",
            Self::WorkshopRotation => "workshop rotation",
            Self::Practical => "practical",
            Self::Assessment => "assessment",
            Self::Break => "break",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// A generated schedule attached to a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "schedule", rename_all = "camelCase")]
pub enum SubjectPlan {
    /// Workshop rotation.
    GroupRotation(RotationSchedule),
    /// Practical station rotation.
    StationRotation(RotationSchedule),
    /// Assessment slots.
    Assessment(AssessmentSchedule),
}

/// One timetabled session of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subject {
    /// Record identifier, unique within a course.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Session type. `None` while the form is incomplete.
    #[serde(rename = "type")]
    pub subject_type: Option<SubjectType>,
    /// Course day (1-based).
    pub day: Option<u32>,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
    /// Length in minutes; must equal `end - start`.
    pub duration: Option<u32>,
    /// Soft-deleted subjects are ignored by conflict checks.
    pub deleted: bool,
    /// Groups taking part in rotations.
    pub groups: GroupSet,

    /// Workshop rotation: number of workshop name fields on the form.
    pub number_of_workshops: usize,
    /// Workshop rotation: workshop names.
    pub workshop_names: Vec<String>,
    /// Workshop rotation: number of rounds.
    pub number_of_rotations: usize,
    /// Workshop rotation: length of one round (minutes).
    pub rotation_duration: u32,

    /// Practical and assessment: number of stations.
    pub number_of_stations: usize,
    /// Practical and assessment: station names.
    pub station_names: Vec<String>,
    /// Practical and assessment: number of time slots.
    pub number_of_time_slots: usize,
    /// Practical: length of one time slot (minutes).
    pub time_slot_duration: u32,

    /// Assessment: phase 1 slot length (minutes).
    pub lead_assist_duration: u32,
    /// Assessment: phase 2 slot length (minutes).
    pub assessed_observe_duration: u32,
    /// Assessment: activity for the cohort not at stations.
    pub concurrent_activity_name: String,
    /// Assessment: phase 1 cohort.
    pub candidate_range_first: Option<CandidateRange>,
    /// Assessment: phase 2 cohort.
    pub candidate_range_second: Option<CandidateRange>,

    /// Generated schedule, once committed.
    pub plan: Option<SubjectPlan>,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            subject_type: None,
            day: None,
            start_time: String::new(),
            end_time: String::new(),
            duration: None,
            deleted: false,
            groups: GroupSet::canonical(),
            number_of_workshops: 0,
            workshop_names: Vec::new(),
            number_of_rotations: 0,
            rotation_duration: 0,
            number_of_stations: 0,
            station_names: Vec::new(),
            number_of_time_slots: 0,
            time_slot_duration: 0,
            lead_assist_duration: 0,
            assessed_observe_duration: 0,
            concurrent_activity_name: String::new(),
            candidate_range_first: None,
            candidate_range_second: None,
            plan: None,
        }
    }
}

impl Subject {
    /// Creates a subject of the given type.
    pub fn new(id: impl Into<String>, name: impl Into<String>, subject_type: SubjectType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subject_type: Some(subject_type),
            ..Self::default()
        }
    }

    /// Sets the course day.
    pub fn on_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    /// Sets start and end time; the duration follows when both parse.
    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self.duration = clock::minutes_between(&self.start_time, &self.end_time)
            .and_then(|m| u32::try_from(m).ok());
        self
    }

    /// Overrides the duration.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    /// Sets the groups.
    pub fn with_groups(mut self, groups: GroupSet) -> Self {
        self.groups = groups;
        self
    }

    /// Configures a workshop rotation.
    pub fn with_workshops<I, S>(mut self, names: I, rotations: usize, rotation_duration: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.workshop_names = names.into_iter().map(Into::into).collect();
        self.number_of_workshops = self.workshop_names.len();
        self.number_of_rotations = rotations;
        self.rotation_duration = rotation_duration;
        self
    }

    /// Configures practical or assessment stations.
    pub fn with_stations<I, S>(mut self, names: I, time_slots: usize, slot_duration: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.station_names = names.into_iter().map(Into::into).collect();
        self.number_of_stations = self.station_names.len();
        self.number_of_time_slots = time_slots;
        self.time_slot_duration = slot_duration;
        self
    }

    /// Configures the assessment phases and concurrent activity.
    pub fn with_assessment(
        mut self,
        lead_assist: u32,
        assessed_observe: u32,
        concurrent_activity: impl Into<String>,
    ) -> Self {
        self.lead_assist_duration = lead_assist;
        self.assessed_observe_duration = assessed_observe;
        self.concurrent_activity_name = concurrent_activity.into();
        self
    }

    /// Marks the subject deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Whether this subject may share an identical window with another workshop.
    pub fn is_workshop(&self) -> bool {
        self.subject_type.is_some_and(SubjectType::is_workshop)
    }

    /// Parsed `[start, end)` window, if both times parse and end follows start.
    pub fn time_window(&self) -> Option<TimeWindow> {
        TimeWindow::from_clock(&self.start_time, &self.end_time)
    }

    /// Workshop names that are actually filled in.
    pub fn filled_workshop_names(&self) -> impl Iterator<Item = &str> {
        self.workshop_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
    }

    /// Configuration for the workshop or station rotation planner.
    ///
    /// Workshop rotations rotate over workshop names and rounds; practicals
    /// over `number_of_stations` stations and time slots.
    pub fn rotation_configuration(&self) -> RotationConfiguration {
        let (names, rounds, slot_duration) = match self.subject_type {
            Some(SubjectType::Practical) => {
                let mut names = self.station_names.clone();
                names.resize(self.number_of_stations, String::new());
                (names, self.number_of_time_slots, self.time_slot_duration)
            }
            _ => (
                self.workshop_names.clone(),
                self.number_of_rotations,
                self.rotation_duration,
            ),
        };
        RotationConfiguration {
            groups: self.groups.clone(),
            sub_activity_names: names,
            rounds,
            start_time: self.start_time.clone(),
            slot_duration,
        }
    }

    /// Configuration for the assessment slot planner.
    pub fn assessment_configuration(&self) -> AssessmentConfiguration {
        AssessmentConfiguration {
            number_of_stations: self.number_of_stations,
            number_of_time_slots: self.number_of_time_slots,
            start_time: self.start_time.clone(),
            lead_assist_duration: self.lead_assist_duration,
            assessed_observe_duration: self.assessed_observe_duration,
            station_names: self.station_names.clone(),
            concurrent_activity_name: self.concurrent_activity_name.clone(),
            candidate_range_first: self.candidate_range_first,
            candidate_range_second: self.candidate_range_second,
        }
    }
}
