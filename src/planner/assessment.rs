//! Assessment slot planning.
//!
//! # Algorithm
//!
//! Seats are paired: pair `p` (0-based) is seats `2p + 1` and `2p + 2`.
//! In slot `k` (0-based) station `s` hosts pair `(s - k) mod S`, so pair
//! `p` sits at station `(p + k) mod S`. For the canonical four stations
//! this is the offset sequence `0, +3, +2, +1` and every pair visits every
//! station once.
//!
//! Within each phase the odd seat holds the active role (Lead, Assessed)
//! in the phase's even steps and the supporting role (Assist, Observe) in
//! its odd steps. Each phase opens with the odd seat active, so the active
//! member of a pair alternates every slot of a phase:
//!
//! | Slot | Odd seat | Even seat |
//! |------|----------|-----------|
//! | 1 | Lead | Assist |
//! | 2 | Assist | Lead |
//! | 3 | Assessed | Observe |
//! | 4 | Observe | Assessed |
//!
//! Slot start times accumulate the phase-dependent slot lengths.

use tracing::{debug, warn};

use crate::error::{PlanError, Result};
use crate::models::clock::{format_clock, format_window, parse_clock, shift_clock};
use crate::models::{
    AssessmentConfiguration, AssessmentSchedule, AssessmentTimeSlot, ConcurrentActivity, Phase,
    SeatAssignment, StationAssignment,
};

/// Plans an assessment.
///
/// Zero stations yields an empty schedule.
///
/// # Errors
/// [`PlanError::InvalidConfiguration`] if the slot count is zero or odd, a
/// phase has no duration, the start time does not parse, there are more
/// station names than stations, the concurrent activity is unnamed, or the
/// cohort ranges are not two disjoint ranges of `2S` candidates.
///
/// # Example
///
/// ```
/// use course_rotation::models::{AssessmentConfiguration, Role};
/// use course_rotation::planner::plan_assessment_slots;
///
/// let config = AssessmentConfiguration::new(4, "09:00")
///     .with_durations(15, 20)
///     .with_concurrent_activity("Skills review");
/// let schedule = plan_assessment_slots(&config).unwrap();
/// assert_eq!(schedule.slots.len(), 4);
/// assert_eq!(schedule.slots[2].start_time, "09:30");
/// assert_eq!(schedule.slots[0].stations[0].candidate_assignments[0].role, Role::Lead);
/// ```
pub fn plan_assessment_slots(config: &AssessmentConfiguration) -> Result<AssessmentSchedule> {
    if config.number_of_stations == 0 {
        debug!("assessment has no stations; returning empty");
        return Ok(AssessmentSchedule::default());
    }
    if let Err(err) = check_structure(config) {
        warn!(error = %err, "assessment configuration rejected by planner");
        return Err(err);
    }

    let start = parse_clock(&config.start_time).ok_or_else(|| {
        PlanError::invalid(format!(
            "assessment start time '{}' is not HH:MM",
            config.start_time
        ))
    })?;
    let (first_cohort, second_cohort) = config.cohorts();
    let concurrent_name = config.concurrent_activity_name.trim().to_string();

    let mut slots = Vec::with_capacity(config.number_of_time_slots);
    let mut offset: u64 = 0;
    for slot in 0..config.number_of_time_slots {
        let phase = config.phase_of(slot);
        let duration = config.duration_of(phase);
        let (station_cohort, concurrent_cohort) = match phase {
            Phase::LeadAssist => (first_cohort, second_cohort),
            Phase::AssessedObserve => (second_cohort, first_cohort),
        };

        slots.push(AssessmentTimeSlot {
            slot_index: slot + 1,
            phase,
            start_time: format_clock(shift_clock(start, offset)),
            time_window: format_window(start, offset, duration),
            duration,
            station_cohort,
            stations: (0..config.number_of_stations)
                .map(|station| station_assignment(config, station, slot, phase))
                .collect(),
            concurrent_activity: ConcurrentActivity {
                name: concurrent_name.clone(),
                candidate_range: concurrent_cohort,
                duration,
            },
        });
        offset += u64::from(duration);
    }

    debug!(
        stations = config.number_of_stations,
        slots = config.number_of_time_slots,
        "planned assessment"
    );
    Ok(AssessmentSchedule { slots })
}

/// Structural checks the validator should already have enforced.
fn check_structure(config: &AssessmentConfiguration) -> Result<()> {
    if config.checked_roster_size().is_none() {
        return Err(PlanError::invalid(format!(
            "{} stations exceed the candidate numbering range",
            config.number_of_stations
        )));
    }
    let slots = config.number_of_time_slots;
    if slots == 0 || slots % 2 != 0 {
        return Err(PlanError::invalid(format!(
            "assessment needs an even, non-zero number of time slots (got {slots})"
        )));
    }
    if config.lead_assist_duration == 0 || config.assessed_observe_duration == 0 {
        return Err(PlanError::invalid(
            "both assessment phases need a slot duration",
        ));
    }
    if config.station_names.len() > config.number_of_stations {
        return Err(PlanError::invalid(format!(
            "{} station names given for {} stations",
            config.station_names.len(),
            config.number_of_stations
        )));
    }
    if config.concurrent_activity_name.trim().is_empty() {
        return Err(PlanError::invalid(
            "assessment needs a concurrent activity",
        ));
    }

    let seats = config.seats_per_cohort();
    let (first, second) = config.cohorts();
    for (label, cohort) in [("first", first), ("second", second)] {
        if cohort.len() != seats || cohort.first == 0 {
            return Err(PlanError::invalid(format!(
                "{label} candidate range {cohort} must hold {seats} candidates numbered from 1"
            )));
        }
    }
    if first.overlaps(&second) {
        return Err(PlanError::invalid(format!(
            "candidate ranges {first} and {second} overlap"
        )));
    }
    Ok(())
}

fn station_assignment(
    config: &AssessmentConfiguration,
    station: usize,
    slot: usize,
    phase: Phase,
) -> StationAssignment {
    let stations = config.number_of_stations;
    let pair = (station + stations - slot % stations) % stations;
    let odd_seat = (pair * 2 + 1) as u32;

    let step = match phase {
        Phase::LeadAssist => slot,
        Phase::AssessedObserve => slot - config.slots_per_phase(),
    };
    let (active, supporting) = phase.roles();
    let (odd_role, even_role) = if step % 2 == 0 {
        (active, supporting)
    } else {
        (supporting, active)
    };

    StationAssignment {
        station_index: station,
        station_name: config.station_name(station),
        candidate_assignments: [
            SeatAssignment {
                candidate_number: odd_seat,
                role: odd_role,
            },
            SeatAssignment {
                candidate_number: odd_seat + 1,
                role: even_role,
            },
        ],
    }
}
