//! # roster-grid
//!
//! Grid geometry and the validated domain model for the laneroster service.
//!
//! ## Design Principles
//!
//! - The grid is a fixed constant: [`TEAMS`] teams of [`LANES_PER_TEAM`]
//!   lanes each. There is no dynamic sizing.
//! - A [`Slot`] can only be obtained through a validating constructor, so
//!   every value in circulation is within range. Range violations surface
//!   as [`GridError`] at the call site instead of deep inside mutation
//!   paths.
//! - `Slot` ordering is lexicographic by `(team, lane)`. Collections keyed
//!   by `Slot` therefore iterate in the canonical scan order, which is
//!   load-bearing for free-slot lookups.
//! - Assignments serialize as flat `{user, team, lane}` records, the format
//!   shared by the snapshot file and the wire surfaces.

mod error;
mod types;

pub use error::GridError;
pub use types::*;
