//! Per-day summaries of a sitter's open availability.
//!
//! Backs the standalone schedule viewer: for each day in a 7-day span,
//! collect the `open` slots that intersect the day and total their open time
//! clipped to the day's bounds.

use chrono::{DateTime, Duration, Utc};

use crate::slot::{SlotStatus, TimeSlot};

/// One day's worth of open availability.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub day_start: DateTime<Utc>,
    pub day_end: DateTime<Utc>,
    /// Open slots intersecting this day, in input order.
    pub open_slots: Vec<TimeSlot>,
    /// Total open time within the day, after clipping slots to the day.
    pub open_minutes: i64,
}

/// Summarize the seven days starting at `day_start = week_start + n days`.
///
/// A slot spanning midnight contributes to every day it touches, clipped to
/// each day's bounds. Non-`open` slots are ignored.
pub fn week_schedule(slots: &[TimeSlot], week_start: DateTime<Utc>) -> Vec<DaySummary> {
    (0..7)
        .map(|offset| {
            let day_start = week_start + Duration::days(offset);
            day_summary(slots, day_start, day_start + Duration::days(1))
        })
        .collect()
}

fn day_summary(
    slots: &[TimeSlot],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> DaySummary {
    let open_slots: Vec<TimeSlot> = slots
        .iter()
        .filter(|s| s.status == SlotStatus::Open && s.overlaps(day_start, day_end))
        .cloned()
        .collect();

    let open_minutes = open_slots
        .iter()
        .map(|s| {
            let clipped_start = s.start_ts.max(day_start);
            let clipped_end = s.end_ts.min(day_end);
            (clipped_end - clipped_start).num_minutes()
        })
        .sum();

    DaySummary {
        day_start,
        day_end,
        open_slots,
        open_minutes,
    }
}
