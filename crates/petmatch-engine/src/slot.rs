//! Slot and window value types shared across the workspace.
//!
//! Field names mirror the marketplace API wire format (`start_ts`/`end_ts`,
//! lowercase status strings), so these types deserialize directly from
//! `GET availability/` responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Lifecycle state of a sitter-declared slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// Bookable time the sitter has published.
    Open,
    /// Time claimed by a confirmed booking.
    Booked,
    /// Time the sitter has blocked off.
    Blocked,
}

/// A sitter-declared time range with a status.
///
/// The API does not guarantee that one sitter's slots are non-overlapping;
/// nothing in this crate may assume they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i64,
    /// Owning sitter profile id.
    pub sitter: i64,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    /// Recurrence is materialized server-side; carried as data only.
    #[serde(default)]
    pub is_recurring: bool,
    pub status: SlotStatus,
}

impl TimeSlot {
    /// Whether this slot temporally intersects the half-open range
    /// `[start, end)`. Touching endpoints do not intersect.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_ts < end && self.end_ts > start
    }
}

/// An owner's desired booking window.
///
/// `start < end` is enforced at construction, so downstream code never sees
/// an empty or inverted window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct RequestedWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unvalidated wire form of [`RequestedWindow`].
#[derive(Deserialize)]
struct RawWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawWindow> for RequestedWindow {
    type Error = EngineError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        RequestedWindow::new(raw.start, raw.end)
    }
}

impl RequestedWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(EngineError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}
