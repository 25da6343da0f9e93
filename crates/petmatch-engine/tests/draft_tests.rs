//! Tests for the booking draft state machine.

use petmatch_engine::draft::{BookingDraft, DraftStep, ServiceType};
use petmatch_engine::error::EngineError;
use petmatch_engine::slot::RequestedWindow;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn window() -> RequestedWindow {
    RequestedWindow::new(
        "2024-06-01T10:00:00Z".parse().unwrap(),
        "2024-06-01T14:00:00Z".parse().unwrap(),
    )
    .unwrap()
}

/// A draft that has passed step 1 and holds everything step 2 needs.
fn complete_draft() -> BookingDraft {
    let mut draft = BookingDraft::new();
    draft.select_pet(4);
    draft.select_pet(2);
    draft.set_service(ServiceType::PetWalking);
    draft.advance().unwrap();
    draft.choose_sitter(9);
    draft.set_window(window());
    draft.set_price_quote(120.0);
    draft
}

// ── Test 1: Step 1 guard — pets required ────────────────────────────────────

#[test]
fn advancing_with_no_pets_is_rejected_and_step_unchanged() {
    let mut draft = BookingDraft::new();
    draft.set_service(ServiceType::HouseSitting);

    assert_eq!(draft.advance(), Err(EngineError::NoPetsSelected));
    assert_eq!(draft.step(), DraftStep::SelectPetsAndService);
}

// ── Test 2: Step 1 guard — service type required ────────────────────────────

#[test]
fn advancing_without_service_type_is_rejected() {
    let mut draft = BookingDraft::new();
    draft.select_pet(1);

    assert_eq!(draft.advance(), Err(EngineError::MissingServiceType));
    assert_eq!(draft.step(), DraftStep::SelectPetsAndService);
}

// ── Test 3: Step 1 passes with one pet and a service ────────────────────────

#[test]
fn advancing_with_pet_and_service_succeeds() {
    let mut draft = BookingDraft::new();
    draft.select_pet(1);
    draft.set_service(ServiceType::PetBoarding);

    assert_eq!(draft.advance(), Ok(DraftStep::ChooseSitterAndTime));
}

// ── Test 4: Step 2 guards — sitter, window, quote ───────────────────────────

#[test]
fn step_two_requires_sitter_window_and_quote() {
    let mut draft = BookingDraft::new();
    draft.select_pet(1);
    draft.set_service(ServiceType::InHomeVisit);
    draft.advance().unwrap();

    assert_eq!(draft.advance(), Err(EngineError::MissingSitter));
    draft.choose_sitter(9);

    assert_eq!(draft.advance(), Err(EngineError::MissingWindow));
    draft.set_window(window());

    assert_eq!(draft.advance(), Err(EngineError::MissingPriceQuote));
    draft.set_price_quote(80.0);

    assert_eq!(draft.advance(), Ok(DraftStep::Review));
}

// ── Test 5: Step 2 guard — non-positive quote rejected locally ──────────────

#[test]
fn non_positive_price_quote_is_rejected() {
    for bad in [0.0, -15.0] {
        let mut draft = complete_draft();
        draft.set_price_quote(bad);

        assert_eq!(
            draft.advance(),
            Err(EngineError::NonPositivePriceQuote(bad))
        );
        assert_eq!(draft.step(), DraftStep::ChooseSitterAndTime);
    }
}

// ── Test 6: Backward navigation never validates ─────────────────────────────

#[test]
fn back_never_validates_and_preserves_data() {
    let mut draft = complete_draft();
    draft.advance().unwrap();
    assert_eq!(draft.step(), DraftStep::Review);

    assert_eq!(draft.back(), DraftStep::ChooseSitterAndTime);
    assert_eq!(draft.back(), DraftStep::SelectPetsAndService);
    // Already at the first step: stays put.
    assert_eq!(draft.back(), DraftStep::SelectPetsAndService);

    // Everything entered earlier survives the round trip.
    assert_eq!(draft.advance(), Ok(DraftStep::ChooseSitterAndTime));
    assert_eq!(draft.advance(), Ok(DraftStep::Review));
}

// ── Test 7: Payload only in review, with the API wire shape ─────────────────

#[test]
fn request_builds_the_create_booking_payload() {
    let mut draft = complete_draft();

    // Not yet in review.
    assert_eq!(draft.request().err(), Some(EngineError::NotInReview));

    draft.advance().unwrap();
    let request = draft.request().unwrap();
    assert_eq!(request.sitter, 9);
    assert_eq!(request.pets, vec![2, 4]);
    assert_eq!(request.service_type, ServiceType::PetWalking);
    assert_eq!(request.price_quote, 120.0);

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["service_type"], "pet_walking");
    assert_eq!(body["start_ts"], "2024-06-01T10:00:00Z");
    assert_eq!(body["end_ts"], "2024-06-01T14:00:00Z");
    // Empty notes stay off the wire.
    assert!(body.get("notes").is_none());
}

// ── Test 8: Notes ride along when present ───────────────────────────────────

#[test]
fn notes_are_serialized_when_non_empty() {
    let mut draft = complete_draft();
    draft.set_notes("Meds at noon");
    draft.advance().unwrap();

    let body = serde_json::to_value(draft.request().unwrap()).unwrap();
    assert_eq!(body["notes"], "Meds at noon");
}

// ── Test 9: Emptying the pet set after review invalidates the payload ───────

#[test]
fn request_revalidates_fields_edited_in_review() {
    let mut draft = complete_draft();
    draft.advance().unwrap();

    draft.deselect_pet(2);
    draft.deselect_pet(4);
    assert_eq!(draft.request().err(), Some(EngineError::NoPetsSelected));
}

// ── Test 10: Submission is terminal ─────────────────────────────────────────

#[test]
fn mark_submitted_requires_review_and_is_terminal() {
    let mut draft = complete_draft();
    assert_eq!(draft.mark_submitted(), Err(EngineError::NotInReview));

    draft.advance().unwrap();
    draft.mark_submitted().unwrap();
    assert_eq!(draft.step(), DraftStep::Submitted);

    assert_eq!(draft.advance(), Err(EngineError::AlreadySubmitted));
    assert_eq!(draft.back(), DraftStep::Submitted);
}

// ── Test 11: Review advance requires submission, not advance ────────────────

#[test]
fn advance_from_review_points_at_submission() {
    let mut draft = complete_draft();
    draft.advance().unwrap();

    assert_eq!(draft.advance(), Err(EngineError::AwaitingSubmission));
    assert_eq!(draft.step(), DraftStep::Review);
}
