//! Subject validation.
//!
//! Checks a subject against its own form fields and against the other
//! subjects of its course before any planner runs. Detects:
//! - Missing required fields
//! - Inverted time windows and durations that disagree with them
//! - Per-type structural minimums (workshop names, stations, slots)
//! - Time-window clashes on the same day
//! - Workshop names already running elsewhere at the same time
//!
//! Some findings are warnings: identical windows between non-workshop
//! subjects and a second assessment on one day are suspicious but allowed.
//! [`ValidationError::is_blocking`] tells them apart.

use std::collections::HashSet;

use crate::models::{clock, Subject, SubjectType, TimeWindow};

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required form field is empty.
    MissingField,
    /// A time does not parse, or the end is not after the start.
    InvalidTimeWindow,
    /// The duration disagrees with the time window.
    DurationMismatch,
    /// The session lacks workshops, stations or slots its type needs.
    StructuralMinimum,
    /// Two stations of one session share a name.
    DuplicateStationName,
    /// The window overlaps another subject on the same day.
    TimeConflict,
    /// The window is identical to another non-workshop subject's (warning).
    IdenticalWindow,
    /// A workshop name already runs in a concurrent rotation.
    DuplicateWorkshopName,
    /// The day already has an assessment (warning).
    MultipleAssessments,
}

impl ValidationErrorKind {
    /// Whether findings of this kind prevent planning.
    pub fn is_blocking(self) -> bool {
        !matches!(self, Self::IdenticalWindow | Self::MultipleAssessments)
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if kind.is_blocking() {
            message
        } else {
            format!("Warning: {message}")
        };
        Self { kind, message }
    }

    /// Whether this finding prevents planning.
    pub fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }
}

/// Whether any finding prevents planning.
pub fn has_blocking_errors(errors: &[ValidationError]) -> bool {
    errors.iter().any(ValidationError::is_blocking)
}

/// Validates a subject, returning the finding messages in check order.
///
/// An empty list means the subject passed. Warnings are included, prefixed
/// with `Warning:`.
///
/// # Example
///
/// ```
/// use course_rotation::models::{Subject, SubjectType};
/// use course_rotation::validation::validate;
///
/// let lecture = Subject::new("s1", "Opening", SubjectType::Lecture)
///     .on_day(1)
///     .with_times("10:00", "09:30")
///     .with_duration(30);
/// let messages = validate(&lecture, &[]);
/// assert!(messages.iter().any(|m| m.contains("End time must be after start time")));
/// ```
pub fn validate(subject: &Subject, existing: &[Subject]) -> Vec<String> {
    validate_subject(subject, existing)
        .into_iter()
        .map(|e| e.message)
        .collect()
}

/// Validates a subject against the other subjects of its course.
///
/// Checks, in order:
/// 1. Required fields (name, type, start/end time, duration, day)
/// 2. End after start; duration equal to the window length
/// 3. Structural minimums for the subject's type
/// 4. Window clashes with non-deleted subjects on the same day
/// 5. Workshop names reused at the same time; repeated assessments
///
/// `existing` may contain the subject itself (matched by id); it is skipped.
pub fn validate_subject(subject: &Subject, existing: &[Subject]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_required(subject, &mut errors);
    let window = check_time_window(subject, &mut errors);

    match subject.subject_type {
        Some(SubjectType::WorkshopRotation) => check_workshop_rotation(subject, &mut errors),
        Some(SubjectType::Practical) => check_practical(subject, &mut errors),
        Some(SubjectType::Assessment) => check_assessment(subject, &mut errors),
        _ => {}
    }

    let others: Vec<&Subject> = existing
        .iter()
        .filter(|o| !o.deleted && !is_same_record(subject, o) && o.day == subject.day)
        .collect();

    if let (Some(window), Some(day)) = (window, subject.day) {
        check_conflicts(subject, window, day, &others, &mut errors);
        check_workshop_duplicates(subject, window, &others, &mut errors);
    }
    if let (Some(SubjectType::Assessment), Some(day)) = (subject.subject_type, subject.day) {
        if let Some(other) = others
            .iter()
            .find(|o| o.subject_type == Some(SubjectType::Assessment))
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::MultipleAssessments,
                format!("day {day} already has an assessment ('{}')", other.name),
            ));
        }
    }

    errors
}

fn is_same_record(subject: &Subject, other: &Subject) -> bool {
    !subject.id.is_empty() && subject.id == other.id
}

fn check_required(subject: &Subject, errors: &mut Vec<ValidationError>) {
    let missing = |field: &str| {
        ValidationError::new(
            ValidationErrorKind::MissingField,
            format!("{field} is required"),
        )
    };

    if subject.name.trim().is_empty() {
        errors.push(missing("Subject name"));
    }
    if subject.subject_type.is_none() {
        errors.push(missing("Subject type"));
    }
    if subject.start_time.trim().is_empty() {
        errors.push(missing("Start time"));
    }
    if subject.end_time.trim().is_empty() {
        errors.push(missing("End time"));
    }
    if subject.duration.is_none() {
        errors.push(missing("Duration"));
    }
    if subject.day.map_or(true, |d| d == 0) {
        errors.push(missing("Day"));
    }
}

/// Returns the parsed window when it is usable for clash checks.
fn check_time_window(subject: &Subject, errors: &mut Vec<ValidationError>) -> Option<TimeWindow> {
    let mut parsed = true;
    for (label, value) in [("Start time", &subject.start_time), ("End time", &subject.end_time)] {
        if !value.trim().is_empty() && clock::parse_clock(value).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeWindow,
                format!("{label} '{value}' must be in HH:MM format"),
            ));
            parsed = false;
        }
    }
    if !parsed {
        return None;
    }

    let minutes = clock::minutes_between(&subject.start_time, &subject.end_time)?;
    if minutes <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeWindow,
            format!(
                "End time must be after start time ({} - {})",
                subject.start_time, subject.end_time
            ),
        ));
        return None;
    }
    if let Some(duration) = subject.duration {
        if i64::from(duration) != minutes {
            errors.push(ValidationError::new(
                ValidationErrorKind::DurationMismatch,
                format!(
                    "Duration ({duration} min) does not match the time window ({minutes} min)"
                ),
            ));
        }
    }
    subject.time_window()
}

fn structural(errors: &mut Vec<ValidationError>, message: impl Into<String>) {
    errors.push(ValidationError::new(
        ValidationErrorKind::StructuralMinimum,
        message,
    ));
}

/// Whether the first `count` entries of `names` are all filled in.
fn all_filled(names: &[String], count: usize) -> bool {
    names.len() >= count && names[..count].iter().all(|n| !n.trim().is_empty())
}

fn check_slots_fit(
    subject: &Subject,
    total_minutes: u64,
    what: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(duration) = subject.duration {
        if total_minutes > u64::from(duration) {
            structural(
                errors,
                format!(
                    "{what} take {total_minutes} min, longer than the session ({duration} min)"
                ),
            );
        }
    }
}

fn check_workshop_rotation(subject: &Subject, errors: &mut Vec<ValidationError>) {
    if subject.filled_workshop_names().next().is_none() {
        structural(errors, "At least one workshop name is required");
    } else if !all_filled(&subject.workshop_names, subject.number_of_workshops) {
        structural(
            errors,
            format!(
                "All {} workshop names must be filled in",
                subject.number_of_workshops
            ),
        );
    }
    if subject.number_of_rotations == 0 {
        structural(errors, "At least one rotation round is required");
    }
    if subject.rotation_duration == 0 {
        structural(errors, "Rotation duration is required");
    }
    check_slots_fit(
        subject,
        subject.number_of_rotations as u64 * u64::from(subject.rotation_duration),
        "Rotation rounds",
        errors,
    );
}

fn check_station_names(subject: &Subject, errors: &mut Vec<ValidationError>) {
    if !all_filled(&subject.station_names, subject.number_of_stations) {
        structural(
            errors,
            format!(
                "All {} station names must be filled in",
                subject.number_of_stations
            ),
        );
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in subject
        .station_names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
    {
        let key = name.to_lowercase();
        if !seen.insert(key.clone()) && reported.insert(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateStationName,
                format!("Station name '{name}' is used more than once"),
            ));
        }
    }
}

fn check_practical(subject: &Subject, errors: &mut Vec<ValidationError>) {
    if subject.number_of_stations == 0 {
        structural(errors, "At least one station is required");
    }
    if subject.number_of_time_slots == 0 {
        structural(errors, "At least one time slot is required");
    }
    if subject.time_slot_duration == 0 {
        structural(errors, "Time slot duration is required");
    }
    check_station_names(subject, errors);
    check_slots_fit(
        subject,
        subject.number_of_time_slots as u64 * u64::from(subject.time_slot_duration),
        "Time slots",
        errors,
    );
}

fn check_assessment(subject: &Subject, errors: &mut Vec<ValidationError>) {
    if subject.number_of_stations < 2 {
        structural(errors, "An assessment needs at least 2 stations");
    }
    if subject.number_of_time_slots < 2 {
        structural(errors, "An assessment needs at least 2 time slots");
    } else if subject.number_of_time_slots % 2 != 0 {
        structural(
            errors,
            "An assessment needs an even number of time slots (two equal phases)",
        );
    }
    if subject.station_names.len() > subject.number_of_stations {
        structural(
            errors,
            format!(
                "{} station names given for {} stations",
                subject.station_names.len(),
                subject.number_of_stations
            ),
        );
    }
    check_station_names(subject, errors);
    if subject.concurrent_activity_name.trim().is_empty() {
        structural(errors, "An assessment must have a concurrent activity name");
    }
    if subject.lead_assist_duration == 0 {
        structural(errors, "Lead/Assist slot duration is required");
    }
    if subject.assessed_observe_duration == 0 {
        structural(errors, "Assessed/Observe slot duration is required");
    }

    let config = subject.assessment_configuration();
    check_slots_fit(subject, config.total_minutes(), "Assessment slots", errors);

    let seats = config.seats_per_cohort();
    let (first, second) = config.cohorts();
    for range in [subject.candidate_range_first, subject.candidate_range_second]
        .into_iter()
        .flatten()
    {
        if range.len() != seats || range.first == 0 {
            structural(
                errors,
                format!("Candidate range {range} must hold {seats} candidates (2 per station)"),
            );
        }
    }
    if first.overlaps(&second) {
        structural(
            errors,
            format!("Candidate ranges {first} and {second} overlap"),
        );
    }
}

fn check_conflicts(
    subject: &Subject,
    window: TimeWindow,
    day: u32,
    others: &[&Subject],
    errors: &mut Vec<ValidationError>,
) {
    for other in others {
        let Some(other_window) = other.time_window() else {
            continue;
        };
        if other_window == window {
            if subject.is_workshop() && other.is_workshop() {
                continue;
            }
            errors.push(ValidationError::new(
                ValidationErrorKind::IdenticalWindow,
                format!(
                    "'{}' has the same time window as '{}' ({window}) on day {day}",
                    subject.name, other.name
                ),
            ));
        } else if window.overlaps(&other_window) {
            errors.push(ValidationError::new(
                ValidationErrorKind::TimeConflict,
                format!(
                    "'{}' ({window}) overlaps '{}' ({other_window}) on day {day}",
                    subject.name, other.name
                ),
            ));
        }
    }
}

fn check_workshop_duplicates(
    subject: &Subject,
    window: TimeWindow,
    others: &[&Subject],
    errors: &mut Vec<ValidationError>,
) {
    let names: Vec<&str> = match subject.subject_type {
        Some(SubjectType::WorkshopRotation) => subject.filled_workshop_names().collect(),
        Some(SubjectType::Workshop) => vec![subject.name.trim()],
        _ => return,
    };

    for other in others {
        if other.subject_type != Some(SubjectType::WorkshopRotation)
            || other.time_window() != Some(window)
        {
            continue;
        }
        for name in &names {
            if other
                .filled_workshop_names()
                .any(|n| n.eq_ignore_ascii_case(name))
            {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateWorkshopName,
                    format!(
                        "Workshop '{name}' is already running in '{}' at the same time",
                        other.name
                    ),
                ));
            }
        }
    }
}
