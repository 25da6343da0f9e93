//! Booking draft state machine.
//!
//! A draft accumulates the owner's inputs across the three wizard steps and
//! becomes a server-side booking only after a successful create call:
//!
//! ```text
//! SelectPetsAndService -> ChooseSitterAndTime -> Review -> Submitted
//! ```
//!
//! Forward transitions validate the step being left; backward transitions
//! never validate. A failed submission leaves the draft in `Review` with its
//! data intact so the owner can retry without re-entering anything.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::slot::RequestedWindow;

/// Service offerings recognized by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    HouseSitting,
    PetBoarding,
    InHomeVisit,
    PetGrooming,
    PetWalking,
}

/// Wizard step the draft is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftStep {
    #[default]
    SelectPetsAndService,
    ChooseSitterAndTime,
    Review,
    Submitted,
}

/// Request body for `POST bookings/`. The server assigns the booking id and
/// `status = requested`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub sitter: i64,
    pub pets: Vec<i64>,
    pub service_type: ServiceType,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    pub price_quote: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// Transient, client-only accumulation of booking inputs.
///
/// Destroyed on submission or navigation away; never persisted.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    step: DraftStep,
    pet_ids: BTreeSet<i64>,
    service_type: Option<ServiceType>,
    sitter: Option<i64>,
    window: Option<RequestedWindow>,
    price_quote: Option<f64>,
    notes: String,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> DraftStep {
        self.step
    }

    pub fn pet_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.pet_ids.iter().copied()
    }

    pub fn sitter(&self) -> Option<i64> {
        self.sitter
    }

    pub fn window(&self) -> Option<&RequestedWindow> {
        self.window.as_ref()
    }

    pub fn select_pet(&mut self, pet_id: i64) {
        self.pet_ids.insert(pet_id);
    }

    pub fn deselect_pet(&mut self, pet_id: i64) {
        self.pet_ids.remove(&pet_id);
    }

    pub fn set_service(&mut self, service: ServiceType) {
        self.service_type = Some(service);
    }

    pub fn choose_sitter(&mut self, sitter_id: i64) {
        self.sitter = Some(sitter_id);
    }

    /// The window arrives already validated (`start < end`), so changing it
    /// can never leave the draft holding an inverted range.
    pub fn set_window(&mut self, window: RequestedWindow) {
        self.window = Some(window);
    }

    pub fn set_price_quote(&mut self, quote: f64) {
        self.price_quote = Some(quote);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Advance one step after validating the step being left.
    ///
    /// On a guard failure the step does not change and the offending field is
    /// reported; nothing already entered is lost.
    pub fn advance(&mut self) -> Result<DraftStep> {
        match self.step {
            DraftStep::SelectPetsAndService => {
                self.validate_pets_and_service()?;
                self.step = DraftStep::ChooseSitterAndTime;
            }
            DraftStep::ChooseSitterAndTime => {
                self.validate_details()?;
                self.step = DraftStep::Review;
            }
            DraftStep::Review => return Err(EngineError::AwaitingSubmission),
            DraftStep::Submitted => return Err(EngineError::AlreadySubmitted),
        }
        Ok(self.step)
    }

    /// Step backward without re-validation. A no-op on the first step and
    /// after submission.
    pub fn back(&mut self) -> DraftStep {
        self.step = match self.step {
            DraftStep::SelectPetsAndService => DraftStep::SelectPetsAndService,
            DraftStep::ChooseSitterAndTime => DraftStep::SelectPetsAndService,
            DraftStep::Review => DraftStep::ChooseSitterAndTime,
            DraftStep::Submitted => DraftStep::Submitted,
        };
        self.step
    }

    /// Build the create-booking payload. Only valid in `Review`.
    ///
    /// Re-validates every field: edits made after reaching `Review` (the
    /// setters stay usable) must not produce an incomplete request.
    pub fn request(&self) -> Result<BookingRequest> {
        if self.step != DraftStep::Review {
            return Err(EngineError::NotInReview);
        }
        let service_type = self.validate_pets_and_service()?;
        let (sitter, window, price_quote) = self.validate_details()?;

        Ok(BookingRequest {
            sitter,
            pets: self.pet_ids.iter().copied().collect(),
            service_type,
            start_ts: window.start(),
            end_ts: window.end(),
            price_quote,
            notes: self.notes.clone(),
        })
    }

    /// Record a successful submission. Only valid in `Review`; the caller is
    /// expected to drop the draft afterwards.
    pub fn mark_submitted(&mut self) -> Result<()> {
        if self.step != DraftStep::Review {
            return Err(EngineError::NotInReview);
        }
        self.step = DraftStep::Submitted;
        Ok(())
    }

    fn validate_pets_and_service(&self) -> Result<ServiceType> {
        if self.pet_ids.is_empty() {
            return Err(EngineError::NoPetsSelected);
        }
        self.service_type.ok_or(EngineError::MissingServiceType)
    }

    fn validate_details(&self) -> Result<(i64, RequestedWindow, f64)> {
        let sitter = self.sitter.ok_or(EngineError::MissingSitter)?;
        let window = self.window.ok_or(EngineError::MissingWindow)?;
        let quote = self.price_quote.ok_or(EngineError::MissingPriceQuote)?;
        if quote <= 0.0 {
            return Err(EngineError::NonPositivePriceQuote(quote));
        }
        Ok((sitter, window, quote))
    }
}
