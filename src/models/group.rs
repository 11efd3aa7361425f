//! Candidate groups.
//!
//! A course splits its candidates into a fixed, ordered set of groups
//! (canonically `A`–`D`) that move together between activities. Group
//! order matters: rotation formulas index into it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlanError, Result};

/// Identifier of one candidate group (e.g. `"A"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl GroupId {
    /// Creates a group identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An ordered set of unique, non-blank group identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GroupId>", into = "Vec<GroupId>")]
pub struct GroupSet {
    groups: Vec<GroupId>,
}

impl GroupSet {
    /// Builds a group set, rejecting blank and duplicate identifiers.
    pub fn new<I, G>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        let mut ordered: Vec<GroupId> = Vec::new();
        for group in groups {
            let raw: GroupId = group.into();
            let group = GroupId::new(raw.as_str().trim());
            if group.as_str().is_empty() {
                return Err(PlanError::invalid("group identifiers must not be blank"));
            }
            if ordered.contains(&group) {
                return Err(PlanError::DuplicateGroup(group.0));
            }
            ordered.push(group);
        }
        Ok(Self { groups: ordered })
    }

    /// The four groups `A`, `B`, `C`, `D` used by the standard course format.
    pub fn canonical() -> Self {
        Self {
            groups: ["A", "B", "C", "D"].into_iter().map(GroupId::from).collect(),
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the set holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group at position `index`.
    pub fn get(&self, index: usize) -> Option<&GroupId> {
        self.groups.get(index)
    }

    /// Groups in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &GroupId> {
        self.groups.iter()
    }

    /// Position of a group within the set.
    pub fn position(&self, group: &GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g == group)
    }
}

impl Default for GroupSet {
    fn default() -> Self {
        Self::canonical()
    }
}

impl TryFrom<Vec<GroupId>> for GroupSet {
    type Error = PlanError;

    fn try_from(groups: Vec<GroupId>) -> Result<Self> {
        Self::new(groups)
    }
}

impl From<GroupSet> for Vec<GroupId> {
    fn from(set: GroupSet) -> Self {
        set.groups
    }
}
