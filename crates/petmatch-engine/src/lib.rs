//! # petmatch-engine
//!
//! Availability coverage and booking-draft core for the petmatch marketplace
//! client. The marketplace API owns persistence and conflict resolution; this
//! crate owns the client-side decisions — does a sitter's declared
//! availability cover a requested window, and is a booking draft complete
//! enough to submit. Everything here is pure and synchronous; network
//! concerns live in `petmatch-client`.
//!
//! ## Modules
//!
//! - [`slot`] — slot and requested-window value types (API wire format)
//! - [`coverage`] — single-slot containment over open slots
//! - [`schedule`] — per-day open-availability summaries
//! - [`draft`] — the booking wizard state machine
//! - [`error`] — error types

pub mod coverage;
pub mod draft;
pub mod error;
pub mod schedule;
pub mod slot;

pub use coverage::{covering_slot, is_window_covered};
pub use draft::{BookingDraft, BookingRequest, DraftStep, ServiceType};
pub use error::EngineError;
pub use schedule::{week_schedule, DaySummary};
pub use slot::{RequestedWindow, SlotStatus, TimeSlot};
