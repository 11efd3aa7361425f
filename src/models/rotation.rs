//! Group rotation model.
//!
//! A rotation moves a fixed set of groups through a set of interchangeable
//! sub-activities (workshops or practical stations) over several rounds or
//! time slots. The same model serves both; the planners differ only in how
//! they pick groups.
//!
//! # Partition invariant
//! Within one round, every configured group appears in exactly one session.
//! When there are fewer sub-activities than groups, several groups share a
//! session; a group is never split across two sessions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{compute_slot_window, GroupId, GroupSet};
use crate::error::{PlanError, Result};

/// Input to the rotation planners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RotationConfiguration {
    /// Groups in rotation order.
    pub groups: GroupSet,
    /// Workshop or station names, in display order.
    pub sub_activity_names: Vec<String>,
    /// Number of rotation rounds (workshops) or time slots (stations).
    pub rounds: usize,
    /// Start of the first round (`HH:MM`). Blank while the form is incomplete.
    pub start_time: String,
    /// Length of one round (minutes).
    pub slot_duration: u32,
}

impl RotationConfiguration {
    /// Creates a configuration over the canonical groups `A`–`D`.
    pub fn new<I, S>(sub_activity_names: I, rounds: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: GroupSet::canonical(),
            sub_activity_names: sub_activity_names.into_iter().map(Into::into).collect(),
            rounds,
            ..Self::default()
        }
    }

    /// Sets the groups.
    pub fn with_groups(mut self, groups: GroupSet) -> Self {
        self.groups = groups;
        self
    }

    /// Sets the start time and round length used for round windows.
    pub fn with_timing(mut self, start_time: impl Into<String>, slot_duration: u32) -> Self {
        self.start_time = start_time.into();
        self.slot_duration = slot_duration;
        self
    }

    /// Display window of round `period` (0-based), or `Time Slot n` when
    /// the timing is incomplete.
    pub fn round_window(&self, period: usize) -> String {
        compute_slot_window(&self.start_time, period, self.slot_duration)
    }
}

impl Default for RotationConfiguration {
    fn default() -> Self {
        Self {
            groups: GroupSet::canonical(),
            sub_activity_names: Vec::new(),
            rounds: 1,
            start_time: String::new(),
            slot_duration: 0,
        }
    }
}

/// A complete rotation plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationSchedule {
    /// Rounds in order.
    pub rounds: Vec<Round>,
}

/// One rotation round or time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Round number (1-based).
    pub index: usize,
    /// Display window (`HH:MM-HH:MM`, or `Time Slot n` without timing).
    pub time_window: String,
    /// Occupied sub-activities, in sub-activity order.
    pub sessions: Vec<Session>,
}

/// Groups attending one sub-activity during one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Position of the sub-activity in the configuration (0-based).
    pub sub_activity_index: usize,
    /// Sub-activity display name.
    pub sub_activity_name: String,
    /// Attending groups, in configured group order. Never empty.
    pub groups: Vec<GroupId>,
}

impl RotationSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the schedule has no rounds.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Number of rounds.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Round by 1-based index.
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.iter().find(|r| r.index == index)
    }

    /// The session a group attends in each round, in round order.
    pub fn itinerary(&self, group: &GroupId) -> Vec<(usize, &Session)> {
        self.rounds
            .iter()
            .filter_map(|round| round.session_for(group).map(|s| (round.index, s)))
            .collect()
    }

    /// Verifies the partition invariant against `groups`.
    ///
    /// Returns a descriptive error naming the first round in which a group
    /// is missing, duplicated or unknown.
    pub fn check_partition(&self, groups: &GroupSet) -> Result<()> {
        let expected: BTreeSet<&GroupId> = groups.iter().collect();
        for round in &self.rounds {
            let mut seen: BTreeSet<&GroupId> = BTreeSet::new();
            for session in &round.sessions {
                if session.groups.is_empty() {
                    return Err(PlanError::invalid(format!(
                        "round {}: '{}' has no groups",
                        round.index, session.sub_activity_name
                    )));
                }
                for group in &session.groups {
                    if !expected.contains(group) {
                        return Err(PlanError::invalid(format!(
                            "round {}: unknown group '{}'",
                            round.index, group
                        )));
                    }
                    if !seen.insert(group) {
                        return Err(PlanError::invalid(format!(
                            "round {}: group '{}' is double-booked",
                            round.index, group
                        )));
                    }
                }
            }
            if let Some(missing) = expected.difference(&seen).next() {
                return Err(PlanError::invalid(format!(
                    "round {}: group '{}' is unassigned",
                    round.index, missing
                )));
            }
        }
        Ok(())
    }
}

impl Round {
    /// The session a group attends in this round.
    pub fn session_for(&self, group: &GroupId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.groups.contains(group))
    }

    /// The session held at a sub-activity in this round, if occupied.
    pub fn session_at(&self, sub_activity_index: usize) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|s| s.sub_activity_index == sub_activity_index)
    }
}
