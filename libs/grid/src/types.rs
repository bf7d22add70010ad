//! Slot coordinates and assignments on the fixed team/lane grid.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::GridError;

/// Number of teams in the grid.
pub const TEAMS: u8 = 3;

/// Number of lanes per team.
pub const LANES_PER_TEAM: u8 = 8;

/// Total number of slots in the grid.
pub const TOTAL_SLOTS: usize = TEAMS as usize * LANES_PER_TEAM as usize;

/// One `(team, lane)` coordinate in the fixed grid.
///
/// A `Slot` can only be obtained through [`Slot::new`], so every value in
/// circulation is within range. Ordering is lexicographic by team, then
/// lane: exactly the deterministic scan order used for free-slot lookups,
/// so a `BTreeMap<Slot, _>` iterates the grid in scan order for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    team: u8,
    lane: u8,
}

impl Slot {
    /// Validates the coordinates and creates a slot.
    ///
    /// Takes wide integers so adapter input passes through unclamped and an
    /// out-of-range value is reported exactly as the caller supplied it.
    pub fn new(team: i64, lane: i64) -> Result<Self, GridError> {
        if !(1..=i64::from(TEAMS)).contains(&team) {
            return Err(GridError::TeamOutOfRange { got: team });
        }
        if !(1..=i64::from(LANES_PER_TEAM)).contains(&lane) {
            return Err(GridError::LaneOutOfRange { got: lane });
        }
        Ok(Self {
            team: team as u8,
            lane: lane as u8,
        })
    }

    /// The team number, `1..=TEAMS`.
    #[must_use]
    pub const fn team(&self) -> u8 {
        self.team
    }

    /// The lane number, `1..=LANES_PER_TEAM`.
    #[must_use]
    pub const fn lane(&self) -> u8 {
        self.lane
    }

    /// Iterates every slot in scan order: team ascending, lane ascending.
    pub fn scan() -> impl Iterator<Item = Slot> {
        (1..=TEAMS).flat_map(|team| (1..=LANES_PER_TEAM).map(move |lane| Slot { team, lane }))
    }

    /// Lanes on this slot's team other than this one, ascending.
    pub fn same_team_alternatives(self) -> impl Iterator<Item = Slot> {
        (1..=LANES_PER_TEAM)
            .filter(move |&lane| lane != self.lane)
            .map(move |lane| Slot {
                team: self.team,
                lane,
            })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team, self.lane)
    }
}

/// Raw serde form shared by [`Slot`] and the coordinate half of
/// [`Assignment`]. Deserialization funnels through [`Slot::new`] so
/// out-of-range records are rejected, not silently admitted.
#[derive(Serialize, Deserialize)]
struct RawSlot {
    team: i64,
    lane: i64,
}

impl Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawSlot {
            team: i64::from(self.team),
            lane: i64::from(self.lane),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawSlot::deserialize(deserializer)?;
        Slot::new(raw.team, raw.lane).map_err(D::Error::custom)
    }
}

/// The binding of one user to exactly one slot.
///
/// Construction validates the coordinates; a failed construction creates no
/// partial state. The user string is caller-supplied and opaque here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    user: String,
    slot: Slot,
}

impl Assignment {
    /// Validates the coordinates and creates an assignment.
    pub fn new(user: impl Into<String>, team: i64, lane: i64) -> Result<Self, GridError> {
        Ok(Self {
            user: user.into(),
            slot: Slot::new(team, lane)?,
        })
    }

    /// Creates an assignment at an already-validated slot.
    #[must_use]
    pub fn at(user: impl Into<String>, slot: Slot) -> Self {
        Self {
            user: user.into(),
            slot,
        }
    }

    /// The assigned user.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The occupied slot.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    /// Shorthand for `self.slot().team()`.
    #[must_use]
    pub const fn team(&self) -> u8 {
        self.slot.team
    }

    /// Shorthand for `self.slot().lane()`.
    #[must_use]
    pub const fn lane(&self) -> u8 {
        self.slot.lane
    }
}

/// Raw serde form of [`Assignment`]: a flat `{user, team, lane}` record.
#[derive(Serialize, Deserialize)]
struct RawAssignment {
    user: String,
    team: i64,
    lane: i64,
}

impl Serialize for Assignment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawAssignment {
            user: self.user.clone(),
            team: i64::from(self.slot.team),
            lane: i64::from(self.slot.lane),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Assignment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawAssignment::deserialize(deserializer)?;
        Assignment::new(raw.user, raw.team, raw.lane).map_err(D::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
