//! Formal assessment model.
//!
//! An assessment runs `S` stations over an even number of time slots split
//! into two equal phases:
//!
//! | Phase | Roles | Slot length |
//! |-------|-------|-------------|
//! | 1 | Lead / Assist | `lead_assist_duration` |
//! | 2 | Assessed / Observe | `assessed_observe_duration` |
//!
//! Each station seats a pair of candidates, so one cohort is `2S`
//! candidates. Two cohorts take part: while one is at the stations the
//! other attends a concurrent activity, and they swap between phases.
//!
//! # Seats and roster numbers
//! Station assignments use seat numbers `1..=2S`, local to the cohort at the
//! stations. The roster number is the seat offset into that cohort's
//! configured [`CandidateRange`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate's role at a station for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Runs the scenario (phase 1).
    Lead,
    /// Supports the lead (phase 1).
    Assist,
    /// Runs the scenario under assessment (phase 2).
    Assessed,
    /// Watches the assessed candidate (phase 2).
    Observe,
}

impl Role {
    /// Whether this is the role doing the scenario (Lead or Assessed).
    pub fn is_active(self) -> bool {
        matches!(self, Self::Lead | Self::Assessed)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lead => "Lead",
            Self::Assist => "Assist",
            Self::Assessed => "Assessed",
            Self::Observe => "Observe",
        };
        f.write_str(label)
    }
}

/// Assessment phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Practice phase: Lead / Assist.
    LeadAssist,
    /// Assessed phase: Assessed / Observe.
    AssessedObserve,
}

impl Phase {
    /// `(active, supporting)` roles of this phase.
    pub fn roles(self) -> (Role, Role) {
        match self {
            Self::LeadAssist => (Role::Lead, Role::Assist),
            Self::AssessedObserve => (Role::Assessed, Role::Observe),
        }
    }
}

/// An inclusive range of candidate numbers, e.g. `1-8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRange {
    /// First candidate number.
    pub first: u32,
    /// Last candidate number (inclusive).
    pub last: u32,
}

impl CandidateRange {
    /// Creates a range.
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Number of candidates; zero for an inverted range.
    pub fn len(&self) -> u32 {
        if self.last < self.first {
            0
        } else {
            self.last - self.first + 1
        }
    }

    /// Whether the range holds no candidates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a candidate number lies in the range.
    pub fn contains(&self, candidate: u32) -> bool {
        candidate >= self.first && candidate <= self.last
    }

    /// Whether two ranges share a candidate.
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.first <= other.last && other.first <= self.last
    }
}

impl fmt::Display for CandidateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// Input to the assessment slot planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentConfiguration {
    /// Number of assessment stations.
    pub number_of_stations: usize,
    /// Number of time slots; even, split into two phases.
    pub number_of_time_slots: usize,
    /// Assessment start time (`HH:MM`).
    pub start_time: String,
    /// Length of each phase 1 slot (minutes).
    pub lead_assist_duration: u32,
    /// Length of each phase 2 slot (minutes).
    pub assessed_observe_duration: u32,
    /// Station names; blank entries display as `Station {n}`.
    pub station_names: Vec<String>,
    /// Activity attended by the cohort not at the stations.
    pub concurrent_activity_name: String,
    /// Cohort at the stations in phase 1. Defaults to `1..=2S`.
    pub candidate_range_first: Option<CandidateRange>,
    /// Cohort at the stations in phase 2. Defaults to `2S+1..=4S`.
    pub candidate_range_second: Option<CandidateRange>,
}

impl Default for AssessmentConfiguration {
    fn default() -> Self {
        Self {
            number_of_stations: 0,
            number_of_time_slots: 4,
            start_time: String::new(),
            lead_assist_duration: 0,
            assessed_observe_duration: 0,
            station_names: Vec::new(),
            concurrent_activity_name: String::new(),
            candidate_range_first: None,
            candidate_range_second: None,
        }
    }
}

impl AssessmentConfiguration {
    /// Creates the canonical four-slot configuration.
    pub fn new(number_of_stations: usize, start_time: impl Into<String>) -> Self {
        Self {
            number_of_stations,
            start_time: start_time.into(),
            ..Self::default()
        }
    }

    /// Sets the number of time slots.
    pub fn with_time_slots(mut self, number_of_time_slots: usize) -> Self {
        self.number_of_time_slots = number_of_time_slots;
        self
    }

    /// Sets the per-slot durations of both phases (minutes).
    pub fn with_durations(mut self, lead_assist: u32, assessed_observe: u32) -> Self {
        self.lead_assist_duration = lead_assist;
        self.assessed_observe_duration = assessed_observe;
        self
    }

    /// Sets the station names.
    pub fn with_station_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.station_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the concurrent activity.
    pub fn with_concurrent_activity(mut self, name: impl Into<String>) -> Self {
        self.concurrent_activity_name = name.into();
        self
    }

    /// Sets both cohort ranges.
    pub fn with_candidate_ranges(mut self, first: CandidateRange, second: CandidateRange) -> Self {
        self.candidate_range_first = Some(first);
        self.candidate_range_second = Some(second);
        self
    }

    /// Candidates seated per slot: two per station. Saturates for station
    /// counts beyond [`checked_roster_size`](Self::checked_roster_size).
    pub fn seats_per_cohort(&self) -> u32 {
        self.number_of_stations
            .checked_mul(2)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(u32::MAX)
    }

    /// Both cohorts together (`4S`), if that fits candidate numbering.
    pub fn checked_roster_size(&self) -> Option<u32> {
        self.number_of_stations
            .checked_mul(4)
            .and_then(|n| u32::try_from(n).ok())
    }

    /// Slots in each phase.
    pub fn slots_per_phase(&self) -> usize {
        self.number_of_time_slots / 2
    }

    /// The two cohorts, with defaults filled in.
    pub fn cohorts(&self) -> (CandidateRange, CandidateRange) {
        let seats = self.seats_per_cohort();
        (
            self.candidate_range_first
                .unwrap_or_else(|| CandidateRange::new(1, seats)),
            self.candidate_range_second
                .unwrap_or_else(|| {
                    CandidateRange::new(seats.saturating_add(1), seats.saturating_mul(2))
                }),
        )
    }

    /// Display name of a station (0-based index).
    pub fn station_name(&self, station_index: usize) -> String {
        self.station_names
            .get(station_index)
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Station {}", station_index + 1))
    }

    /// Phase of a slot (0-based index).
    pub fn phase_of(&self, slot_index: usize) -> Phase {
        if slot_index < self.slots_per_phase() {
            Phase::LeadAssist
        } else {
            Phase::AssessedObserve
        }
    }

    /// Slot length of a phase (minutes).
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::LeadAssist => self.lead_assist_duration,
            Phase::AssessedObserve => self.assessed_observe_duration,
        }
    }

    /// Total length of all slots (minutes).
    pub fn total_minutes(&self) -> u64 {
        let first = self.slots_per_phase() as u64;
        let second = (self.number_of_time_slots - self.slots_per_phase()) as u64;
        first
            .saturating_mul(u64::from(self.lead_assist_duration))
            .saturating_add(second.saturating_mul(u64::from(self.assessed_observe_duration)))
    }
}

/// A planned assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSchedule {
    /// Time slots in order.
    pub slots: Vec<AssessmentTimeSlot>,
}

/// One assessment time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentTimeSlot {
    /// Slot number (1-based).
    pub slot_index: usize,
    /// Phase this slot belongs to.
    pub phase: Phase,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// Display window (`HH:MM-HH:MM`).
    pub time_window: String,
    /// Slot length (minutes).
    pub duration: u32,
    /// Cohort seated at the stations.
    pub station_cohort: CandidateRange,
    /// Station assignments, in station order.
    pub stations: Vec<StationAssignment>,
    /// Where the other cohort is.
    pub concurrent_activity: ConcurrentActivity,
}

/// The pair of candidates at one station in one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationAssignment {
    /// Station position (0-based).
    pub station_index: usize,
    /// Station display name.
    pub station_name: String,
    /// Odd seat first, even seat second.
    pub candidate_assignments: [SeatAssignment; 2],
}

/// A seat number and the role it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    /// Seat number (`1..=2S`).
    pub candidate_number: u32,
    /// Role in this slot.
    pub role: Role,
}

/// The non-assessment activity running alongside a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcurrentActivity {
    /// Activity name.
    pub name: String,
    /// Candidates attending.
    pub candidate_range: CandidateRange,
    /// Length (minutes), equal to the slot length.
    pub duration: u32,
}

/// Candidate-pair view used by the recording screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePair {
    /// Slot number (1-based).
    pub time_slot: usize,
    /// Station position (0-based).
    pub station_index: usize,
    /// Station display name.
    pub station: String,
    /// Odd seat.
    pub candidate1: u32,
    /// Even seat.
    pub candidate2: u32,
    /// Slot start time.
    pub start_time: String,
}

/// One seat in one slot, flattened for completion tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAssignment {
    /// Seat number (`1..=2S`).
    pub candidate_number: u32,
    /// Candidate number in the course roster.
    pub roster_number: u32,
    /// Slot number (1-based).
    pub time_slot: usize,
    /// Phase of the slot.
    pub phase: Phase,
    /// Station position (0-based).
    pub station_index: usize,
    /// Station display name.
    pub station: String,
    /// Role in this slot.
    pub role: Role,
    /// Slot start time.
    pub start_time: String,
    /// Slot length (minutes).
    pub duration: u32,
}

/// Flattens slots into one candidate pair per station per slot.
pub fn derive_candidate_pairs(slots: &[AssessmentTimeSlot]) -> Vec<CandidatePair> {
    slots
        .iter()
        .flat_map(|slot| {
            slot.stations.iter().map(move |station| {
                let [first, second] = station.candidate_assignments;
                CandidatePair {
                    time_slot: slot.slot_index,
                    station_index: station.station_index,
                    station: station.station_name.clone(),
                    candidate1: first.candidate_number,
                    candidate2: second.candidate_number,
                    start_time: slot.start_time.clone(),
                }
            })
        })
        .collect()
}

/// Flattens slots into one entry per seat per slot.
pub fn derive_candidate_assignments(slots: &[AssessmentTimeSlot]) -> Vec<CandidateAssignment> {
    let mut assignments = Vec::new();
    for slot in slots {
        for station in &slot.stations {
            for seat in &station.candidate_assignments {
                assignments.push(CandidateAssignment {
                    candidate_number: seat.candidate_number,
                    roster_number: slot.station_cohort.first + seat.candidate_number - 1,
                    time_slot: slot.slot_index,
                    phase: slot.phase,
                    station_index: station.station_index,
                    station: station.station_name.clone(),
                    role: seat.role,
                    start_time: slot.start_time.clone(),
                    duration: slot.duration,
                });
            }
        }
    }
    assignments
}

impl AssessmentSchedule {
    /// Whether the schedule has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot by 1-based index.
    pub fn slot(&self, slot_index: usize) -> Option<&AssessmentTimeSlot> {
        self.slots.iter().find(|s| s.slot_index == slot_index)
    }

    /// See [`derive_candidate_pairs`].
    pub fn candidate_pairs(&self) -> Vec<CandidatePair> {
        derive_candidate_pairs(&self.slots)
    }

    /// See [`derive_candidate_assignments`].
    pub fn candidate_assignments(&self) -> Vec<CandidateAssignment> {
        derive_candidate_assignments(&self.slots)
    }

    /// Every slot a seat is assigned, in slot order.
    pub fn assignments_for_candidate(&self, candidate_number: u32) -> Vec<CandidateAssignment> {
        self.candidate_assignments()
            .into_iter()
            .filter(|a| a.candidate_number == candidate_number)
            .collect()
    }

    /// Every slot a course roster number is seated at a station.
    pub fn assignments_for_roster(&self, roster_number: u32) -> Vec<CandidateAssignment> {
        self.candidate_assignments()
            .into_iter()
            .filter(|a| a.roster_number == roster_number)
            .collect()
    }

    /// The concurrent activity a roster number attends, by slot number.
    pub fn concurrent_slots_for_roster(&self, roster_number: u32) -> Vec<usize> {
        self.slots
            .iter()
            .filter(|s| s.concurrent_activity.candidate_range.contains(roster_number))
            .map(|s| s.slot_index)
            .collect()
    }
}
