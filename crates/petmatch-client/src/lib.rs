//! # petmatch-client
//!
//! Asynchronous REST client for the petmatch marketplace API, plus the
//! availability filtering every screen shares: a per-sitter slot cache, a
//! fan-out/fan-in sitter filter with last-write-wins request generations,
//! and the booking submission flow. The pure decision logic lives in
//! `petmatch-engine`; this crate owns everything that touches the network.
//!
//! ## Modules
//!
//! - [`client`] — `ApiClient` and `ClientConfig`
//! - [`session`] — explicit credential/role state
//! - [`models`] — wire types for API payloads
//! - [`filter`] — `SlotSource`, `AvailabilityIndex`, `SitterFilter`
//! - [`submit`] — draft submission orchestration
//! - [`error`] — the `ApiError` taxonomy

pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod session;
pub mod submit;

pub use client::{ApiClient, ClientConfig};
pub use error::{ApiError, ServerRejection};
pub use filter::{AvailabilityIndex, FilterOutcome, SitterFilter, SitterQuery, SlotSource};
pub use models::{Booking, BookingStatus, LoginResponse, NewReview, NewSlot, Pet, Review, Sitter, SlotPatch};
pub use session::{Role, Session};
pub use submit::{submit_draft, BookingGateway};
