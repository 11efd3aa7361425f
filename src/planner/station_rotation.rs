//! Practical station rotation (Latin square).
//!
//! # Algorithm
//!
//! With `S` stations, `G` groups and time slot `t` (1-based):
//! - `S == 2`, `G == 4`: the course's paired-halves convention. Odd slots
//!   put the first two groups at Station 1 and the last two at Station 2;
//!   even slots swap them.
//! - `S < G` otherwise: station `s` takes up to `ceil(G / S)` groups
//!   `(s + t - 1 + i * S) mod G`, skipping groups already claimed in the slot.
//! - `S >= G`: station `s` hosts group `(s + t - 1) mod S` when that index
//!   names a group.
//!
//! # Reference
//! Colbourn & Dinitz (2007), "Handbook of Combinatorial Designs", Latin squares

use tracing::debug;

use super::claims::{build_round, ClaimedSlots};
use crate::models::{RotationConfiguration, RotationSchedule, Round, Session};

/// Plans a practical station rotation over `config.rounds` time slots.
///
/// Every configured station takes part; blank names display as
/// `Station {n}`. Zero stations, zero slots or no groups yield an empty
/// schedule.
///
/// # Example
///
/// ```
/// use course_rotation::models::RotationConfiguration;
/// use course_rotation::planner::plan_station_rotation;
///
/// let schedule = plan_station_rotation(&RotationConfiguration::new(["Bay 1", "Bay 2"], 2));
/// let slot1 = &schedule.rounds[0];
/// assert_eq!(slot1.sessions[0].groups.len(), 2); // A + B
/// assert_eq!(slot1.sessions[1].groups[0].as_str(), "C");
/// ```
pub fn plan_station_rotation(config: &RotationConfiguration) -> RotationSchedule {
    let stations = station_labels(&config.sub_activity_names);
    if stations.is_empty() || config.groups.is_empty() || config.rounds == 0 {
        debug!("station rotation has no stations, groups or slots; returning empty");
        return RotationSchedule::new();
    }

    let paired_halves = stations.len() == 2 && config.groups.len() == 4;
    let mut claims = ClaimedSlots::new();
    let rounds = (0..config.rounds)
        .map(|period| {
            if paired_halves {
                paired_halves_round(period, &stations, config)
            } else {
                build_round(period, &stations, config, &mut claims)
            }
        })
        .collect();
    let schedule = RotationSchedule { rounds };
    debug_assert!(schedule.check_partition(&config.groups).is_ok());

    debug!(
        stations = stations.len(),
        groups = config.groups.len(),
        slots = config.rounds,
        paired_halves,
        "planned station rotation"
    );
    schedule
}

/// Station display names, with blanks replaced by `Station {n}`.
fn station_labels(names: &[String]) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim();
            if name.is_empty() {
                format!("Station {}", i + 1)
            } else {
                name.to_string()
            }
        })
        .collect()
}

/// The 2-station, 4-group alternation.
fn paired_halves_round(period: usize, stations: &[String], config: &RotationConfiguration) -> Round {
    let groups = &config.groups;
    let halves = [[0, 1], [2, 3]];
    let order = if period % 2 == 0 { [0, 1] } else { [1, 0] };

    let sessions = order
        .iter()
        .enumerate()
        .map(|(station, &half)| Session {
            sub_activity_index: station,
            sub_activity_name: stations[station].clone(),
            groups: halves[half]
                .iter()
                .filter_map(|&g| groups.get(g).cloned())
                .collect(),
        })
        .collect();

    Round {
        index: period + 1,
        time_window: config.round_window(period),
        sessions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, GroupSet};

    fn layout(schedule: &RotationSchedule, slot: usize) -> Vec<Vec<&str>> {
        schedule.rounds[slot]
            .sessions
            .iter()
            .map(|s| s.groups.iter().map(GroupId::as_str).collect())
            .collect()
    }

    #[test]
    fn test_two_stations_four_groups_alternate() {
        let config = RotationConfiguration::new(["Station 1", "Station 2"], 4);
        let schedule = plan_station_rotation(&config);
        assert_eq!(layout(&schedule, 0), vec![vec!["A", "B"], vec!["C", "D"]]);
        assert_eq!(layout(&schedule, 1), vec![vec!["C", "D"], vec!["A", "B"]]);
        assert_eq!(layout(&schedule, 2), vec![vec!["A", "B"], vec!["C", "D"]]);
        assert_eq!(layout(&schedule, 3), vec![vec!["C", "D"], vec!["A", "B"]]);
    }

    #[test]
    fn test_four_stations_latin_square() {
        let config = RotationConfiguration::new(["S1", "S2", "S3", "S4"], 4);
        let schedule = plan_station_rotation(&config);
        // Each station sees each group exactly once over four slots.
        for station in 0..4 {
            let mut seen: Vec<&str> = (0..4)
                .flat_map(|slot| layout(&schedule, slot)[station].clone())
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, vec!["A", "B", "C", "D"]);
        }
    }

    #[test]
    fn test_three_stations_four_groups() {
        let config = RotationConfiguration::new(["S1", "S2", "S3"], 3);
        let schedule = plan_station_rotation(&config);
        assert_eq!(layout(&schedule, 0), vec![vec!["A", "D"], vec!["B"], vec!["C"]]);
        assert_eq!(layout(&schedule, 1), vec![vec!["A", "B"], vec!["C"], vec!["D"]]);
        assert!(schedule.check_partition(&GroupSet::canonical()).is_ok());
    }

    #[test]
    fn test_blank_station_names_labelled() {
        let config = RotationConfiguration::new(["", "Bay"], 1);
        let schedule = plan_station_rotation(&config);
        assert_eq!(schedule.rounds[0].sessions[0].sub_activity_name, "Station 1");
        assert_eq!(schedule.rounds[0].sessions[1].sub_activity_name, "Bay");
    }

    #[test]
    fn test_two_stations_other_group_counts_use_formula() {
        let groups = GroupSet::new(["A", "B", "C"]).unwrap();
        let config = RotationConfiguration::new(["S1", "S2"], 2).with_groups(groups);
        let schedule = plan_station_rotation(&config);
        assert_eq!(layout(&schedule, 0), vec![vec!["A", "C"], vec!["B"]]);
        assert_eq!(layout(&schedule, 1), vec![vec!["A", "B"], vec!["C"]]);
    }

    #[test]
    fn test_slot_windows() {
        let config = RotationConfiguration::new(["Bay 1", "Bay 2"], 3).with_timing("09:00", 20);
        let schedule = plan_station_rotation(&config);
        let windows: Vec<&str> = schedule
            .rounds
            .iter()
            .map(|r| r.time_window.as_str())
            .collect();
        assert_eq!(windows, vec!["09:00-09:20", "09:20-09:40", "09:40-10:00"]);

        let untimed = plan_station_rotation(&RotationConfiguration::new(["S1", "S2", "S3"], 2));
        assert_eq!(untimed.rounds[1].time_window, "Time Slot 2");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(plan_station_rotation(&RotationConfiguration::new(Vec::<String>::new(), 3)).is_empty());
        assert!(plan_station_rotation(&RotationConfiguration::new(["S1"], 0)).is_empty());
    }

    #[test]
    fn test_partition_exhaustive() {
        let labels = ["A", "B", "C", "D", "E", "F"];
        for stations in 1..=8 {
            for group_count in 1..=6 {
                let groups = GroupSet::new(labels[..group_count].iter().copied()).unwrap();
                let names: Vec<String> = (1..=stations).map(|i| format!("S{i}")).collect();
                let config = RotationConfiguration::new(names, 8).with_groups(groups.clone());
                let schedule = plan_station_rotation(&config);
                assert_eq!(schedule.round_count(), 8);
                assert!(
                    schedule.check_partition(&groups).is_ok(),
                    "{stations} stations x {group_count} groups"
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let config = RotationConfiguration::new(["S1", "S2", "S3"], 6);
        assert_eq!(plan_station_rotation(&config), plan_station_rotation(&config));
    }
}
