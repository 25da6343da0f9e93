//! Booking submission: drive a draft from `Review` to `Submitted`.

use async_trait::async_trait;
use petmatch_engine::{BookingDraft, BookingRequest};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Booking;

/// The create-booking seam. [`ApiClient`] posts to the live API; tests use
/// in-memory fakes.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking>;
}

#[async_trait]
impl BookingGateway for ApiClient {
    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        ApiClient::create_booking(self, request).await
    }
}

/// Submit a reviewed draft through `gateway`.
///
/// On success the draft is marked `Submitted` and the created booking is
/// returned for appending to the visible list; the caller then drops the
/// draft. On any failure the draft stays in `Review` with its data intact,
/// so the owner can retry without re-entering anything.
pub async fn submit_draft(
    gateway: &dyn BookingGateway,
    draft: &mut BookingDraft,
) -> Result<Booking> {
    let request = draft.request()?;
    let booking = gateway.create_booking(&request).await?;
    draft.mark_submitted()?;
    Ok(booking)
}
