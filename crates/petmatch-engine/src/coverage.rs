//! Decide whether a sitter's declared availability covers a requested window.
//!
//! Coverage requires one contiguous `open` slot spanning the entire window.
//! Partial overlaps and unions of adjacent open slots do not count — a sitter
//! with `[9:00, 12:00)` and `[12:00, 15:00)` open does NOT cover
//! `[10:00, 14:00)`.

use crate::slot::{RequestedWindow, SlotStatus, TimeSlot};

/// Find the first `open` slot that fully contains the requested window.
///
/// Containment is `slot.start_ts <= window.start && slot.end_ts >= window.end`.
/// `booked` and `blocked` slots are never considered, even when they
/// temporally overlap an `open` slot for the same sitter.
pub fn covering_slot<'a>(
    requested: &RequestedWindow,
    slots: &'a [TimeSlot],
) -> Option<&'a TimeSlot> {
    slots.iter().find(|slot| {
        slot.status == SlotStatus::Open
            && slot.start_ts <= requested.start()
            && slot.end_ts >= requested.end()
    })
}

/// Whether any single `open` slot fully contains the requested window.
///
/// Returns `false` for an empty slot list. Pure function; inputs are not
/// mutated.
pub fn is_window_covered(requested: &RequestedWindow, slots: &[TimeSlot]) -> bool {
    covering_slot(requested, slots).is_some()
}
