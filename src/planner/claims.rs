//! Claimed-slot tracking and the shared Latin-square round builder.
//!
//! Both rotation planners place groups period by period. A group placed in
//! a period is *claimed* for that period; later placements skip claimed
//! groups, which is what keeps every round a partition of the group set.

use std::collections::BTreeSet;

use crate::models::{RotationConfiguration, Round, Session};

/// Set of `(period, group index)` pairs already placed.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClaimedSlots {
    claimed: BTreeSet<(usize, usize)>,
}

impl ClaimedSlots {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claims a group for a period. Returns `false` if it was already taken.
    pub(crate) fn claim(&mut self, period: usize, group: usize) -> bool {
        self.claimed.insert((period, group))
    }

    /// Number of groups claimed in a period.
    pub(crate) fn claimed_in(&self, period: usize) -> usize {
        self.claimed.range((period, 0)..(period + 1, 0)).count()
    }
}

/// Group indices hosted by each unit (workshop or station) in one period.
///
/// # Algorithm
/// - `units >= groups`: unit `u` hosts group `(u + period) mod units` when
///   that index names a group; the remaining units are idle.
/// - `units < groups`: unit `u` takes up to `ceil(groups / units)` groups
///   `(u + period + k * units) mod groups`, skipping claimed ones. The
///   strides cover every residue, and the unit's own first index is never
///   claimed by an earlier unit, so no unit is left empty.
///
/// Indices within a unit are returned in ascending (configured) order.
pub(crate) fn assign_period(
    units: usize,
    groups: usize,
    period: usize,
    claims: &mut ClaimedSlots,
) -> Vec<Vec<usize>> {
    let mut hosted = Vec::with_capacity(units);

    if units >= groups {
        for unit in 0..units {
            let group = (unit + period) % units;
            if group < groups && claims.claim(period, group) {
                hosted.push(vec![group]);
            } else {
                hosted.push(Vec::new());
            }
        }
        debug_assert_eq!(claims.claimed_in(period), groups);
        return hosted;
    }

    let per_unit = groups.div_ceil(units);
    for unit in 0..units {
        let mut taken = Vec::with_capacity(per_unit);
        for k in 0..per_unit {
            let group = (unit + period + k * units) % groups;
            if claims.claim(period, group) {
                taken.push(group);
            }
        }
        taken.sort_unstable();
        hosted.push(taken);
    }
    debug_assert_eq!(claims.claimed_in(period), groups);
    hosted
}

/// Builds round `period + 1`, dropping idle units.
pub(crate) fn build_round(
    period: usize,
    names: &[String],
    config: &RotationConfiguration,
    claims: &mut ClaimedSlots,
) -> Round {
    let groups = &config.groups;
    let sessions = assign_period(names.len(), groups.len(), period, claims)
        .into_iter()
        .enumerate()
        .filter(|(_, hosted)| !hosted.is_empty())
        .map(|(unit, hosted)| Session {
            sub_activity_index: unit,
            sub_activity_name: names[unit].clone(),
            groups: hosted
                .into_iter()
                .filter_map(|g| groups.get(g).cloned())
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

    #[test]
    fn test_claim_once() {
        let mut claims = ClaimedSlots::new();
        assert!(claims.claim(0, 2));
        assert!(!claims.claim(0, 2));
        assert!(claims.claim(1, 2));
        assert_eq!(claims.claimed_in(0), 1);
        assert_eq!(claims.claimed_in(1), 1);
        assert_eq!(claims.claimed_in(2), 0);
    }

    #[test]
    fn test_assign_period_one_group_per_unit() {
        let mut claims = ClaimedSlots::new();
        assert_eq!(
            assign_period(4, 4, 1, &mut claims),
            vec![vec![1], vec![2], vec![3], vec![0]]
        );
    }

    #[test]
    fn test_assign_period_more_units_than_groups() {
        let mut claims = ClaimedSlots::new();
        let hosted = assign_period(5, 3, 0, &mut claims);
        assert_eq!(hosted, vec![vec![0], vec![1], vec![2], vec![], vec![]]);
        assert_eq!(claims.claimed_in(0), 3);
    }

    #[test]
    fn test_assign_period_combines_groups() {
        // 3 stations, 4 groups: the fourth group joins the first station.
        let mut claims = ClaimedSlots::new();
        let hosted = assign_period(3, 4, 0, &mut claims);
        assert_eq!(hosted, vec![vec![0, 3], vec![1], vec![2]]);
    }

    #[test]
    fn test_assign_period_partitions_every_period() {
        for units in 1..=8 {
            for groups in 1..=6 {
                let mut claims = ClaimedSlots::new();
                for period in 0..10 {
                    let hosted = assign_period(units, groups, period, &mut claims);
                    let mut all: Vec<usize> = hosted.iter().flatten().copied().collect();
                    all.sort_unstable();
                    assert_eq!(all, (0..groups).collect::<Vec<_>>(), "{units}x{groups} p{period}");
                    if units < groups {
                        assert!(hosted.iter().all(|h| !h.is_empty()));
                    }
                }
            }
        }
    }
}
