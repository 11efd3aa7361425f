//! Workshop group rotation.
//!
//! # Algorithm
//!
//! With `W` workshops, `G` groups and round `r` (1-based):
//! - `W >= G`: workshop `i` hosts group `(i + r - 1) mod W` when that index
//!   names a group. With `W == G` every workshop is busy every round.
//! - `W < G`: groups are combined. Workshop `i` takes up to `ceil(G / W)`
//!   groups `(r - 1 + i + k * W) mod G`, skipping groups already claimed
//!   in the round.
//!
//! # Complexity
//! O(R * G) where R = rounds.

use tracing::debug;

use super::claims::{build_round, ClaimedSlots};
use crate::error::{PlanError, Result};
use crate::models::{RotationConfiguration, RotationSchedule};

/// Plans a workshop rotation.
///
/// Blank workshop names are dropped and repeated names keep only their
/// first occurrence. No usable names yields an empty schedule.
///
/// # Errors
/// [`PlanError::InvalidConfiguration`] if there are no groups or no rounds.
///
/// # Example
///
/// ```
/// use course_rotation::models::RotationConfiguration;
/// use course_rotation::planner::plan_group_rotation;
///
/// let config = RotationConfiguration::new(["Airway", "Defib", "IO", "Splints"], 4);
/// let schedule = plan_group_rotation(&config).unwrap();
/// assert_eq!(schedule.round_count(), 4);
/// assert_eq!(schedule.rounds[1].sessions[0].groups[0].as_str(), "B");
/// ```
pub fn plan_group_rotation(config: &RotationConfiguration) -> Result<RotationSchedule> {
    if config.groups.is_empty() {
        return Err(PlanError::invalid("a workshop rotation needs at least one group"));
    }
    if config.rounds == 0 {
        return Err(PlanError::invalid(
            "a workshop rotation needs at least one rotation round",
        ));
    }

    let names = distinct_names(&config.sub_activity_names);
    if names.is_empty() {
        debug!("no workshop names given; returning an empty rotation");
        return Ok(RotationSchedule::new());
    }

    let mut claims = ClaimedSlots::new();
    let rounds = (0..config.rounds)
        .map(|period| build_round(period, &names, config, &mut claims))
        .collect();
    let schedule = RotationSchedule { rounds };
    schedule.check_partition(&config.groups)?;

    debug!(
        workshops = names.len(),
        groups = config.groups.len(),
        rounds = config.rounds,
        "planned workshop rotation"
    );
    Ok(schedule)
}

/// Trims names, drops blanks and keeps the first of any repeated name.
fn distinct_names(names: &[String]) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(names.len());
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !distinct.iter().any(|d| d == name) {
            distinct.push(name.to_string());
        }
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, GroupSet};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ids(groups: &[GroupId]) -> Vec<&str> {
        groups.iter().map(GroupId::as_str).collect()
    }

    #[test]
    fn test_standard_rotation_four_by_four() {
        let config = RotationConfiguration::new(["W1", "W2", "W3", "W4"], 4);
        let schedule = plan_group_rotation(&config).unwrap();

        let round1: Vec<Vec<&str>> = schedule.rounds[0]
            .sessions
            .iter()
            .map(|s| ids(&s.groups))
            .collect();
        assert_eq!(round1, vec![vec!["A"], vec!["B"], vec!["C"], vec!["D"]]);

        let round2: Vec<Vec<&str>> = schedule.rounds[1]
            .sessions
            .iter()
            .map(|s| ids(&s.groups))
            .collect();
        assert_eq!(round2, vec![vec!["B"], vec!["C"], vec!["D"], vec!["A"]]);
    }

    #[test]
    fn test_each_group_visits_every_workshop() {
        let config = RotationConfiguration::new(["W1", "W2", "W3", "W4"], 4);
        let schedule = plan_group_rotation(&config).unwrap();
        for group in GroupSet::canonical().iter() {
            let mut visited: Vec<usize> = schedule
                .itinerary(group)
                .iter()
                .map(|(_, s)| s.sub_activity_index)
                .collect();
            visited.sort_unstable();
            assert_eq!(visited, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_two_workshops_combine_groups() {
        let config = RotationConfiguration::new(["Airway", "Defib"], 2);
        let schedule = plan_group_rotation(&config).unwrap();
        let round1 = &schedule.rounds[0];
        assert_eq!(ids(&round1.sessions[0].groups), vec!["A", "C"]);
        assert_eq!(ids(&round1.sessions[1].groups), vec!["B", "D"]);
        let round2 = &schedule.rounds[1];
        assert_eq!(ids(&round2.sessions[0].groups), vec!["B", "D"]);
        assert_eq!(ids(&round2.sessions[1].groups), vec!["A", "C"]);
    }

    #[test]
    fn test_round_windows() {
        let config = RotationConfiguration::new(["Airway", "Defib", "IO"], 3).with_timing("10:00", 30);
        let schedule = plan_group_rotation(&config).unwrap();
        assert_eq!(schedule.rounds[0].time_window, "10:00-10:30");
        assert_eq!(schedule.rounds[2].time_window, "11:00-11:30");
    }

    #[test]
    fn test_names_filtered_and_deduplicated() {
        let config = RotationConfiguration::new(["Airway", " ", "Airway ", "Defib", ""], 1);
        let schedule = plan_group_rotation(&config).unwrap();
        let names: Vec<&str> = schedule.rounds[0]
            .sessions
            .iter()
            .map(|s| s.sub_activity_name.as_str())
            .collect();
        assert_eq!(names, vec!["Airway", "Defib"]);
    }

    #[test]
    fn test_no_names_is_empty_schedule() {
        let config = RotationConfiguration::new(["", "  "], 3);
        assert!(plan_group_rotation(&config).unwrap().is_empty());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let config = RotationConfiguration::new(["Airway"], 0);
        let err = plan_group_rotation(&config).unwrap_err();
        assert!(matches!(err, PlanError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_empty_groups_rejected() {
        let config = RotationConfiguration::new(["Airway"], 1)
            .with_groups(GroupSet::new(Vec::<&str>::new()).unwrap());
        assert!(plan_group_rotation(&config).is_err());
    }

    #[test]
    fn test_partition_exhaustive() {
        let labels = ["A", "B", "C", "D", "E", "F"];
        for workshops in 1..=8 {
            for group_count in 1..=6 {
                let groups = GroupSet::new(labels[..group_count].iter().copied()).unwrap();
                let names: Vec<String> = (1..=workshops).map(|i| format!("W{i}")).collect();
                let config = RotationConfiguration::new(names, 8).with_groups(groups.clone());
                let schedule = plan_group_rotation(&config).unwrap();
                assert_eq!(schedule.round_count(), 8);
                assert!(
                    schedule.check_partition(&groups).is_ok(),
                    "{workshops} workshops x {group_count} groups"
                );
            }
        }
    }

    #[test]
    fn test_partition_random_forms() {
        let labels = ["A", "B", "C", "D", "E", "F"];
        let pool = ["Airway", "Defib", "IO", "Splints", "Cannulation", "", " ", "ECG"];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let group_count = rng.random_range(1..=6);
            let groups = GroupSet::new(labels[..group_count].iter().copied()).unwrap();
            let names: Vec<&str> = (0..rng.random_range(0..=8))
                .map(|_| pool[rng.random_range(0..pool.len())])
                .collect();
            let config =
                RotationConfiguration::new(names, rng.random_range(1..=6)).with_groups(groups.clone());
            let schedule = plan_group_rotation(&config).unwrap();
            assert!(schedule.check_partition(&groups).is_ok(), "{config:?}");
        }
    }

    #[test]
    fn test_deterministic() {
        let config = RotationConfiguration::new(["Airway", "Defib", "IO"], 5);
        let a = plan_group_rotation(&config).unwrap();
        let b = plan_group_rotation(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
