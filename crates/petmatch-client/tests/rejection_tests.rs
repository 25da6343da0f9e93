//! Tests for rejection-body parsing and the wire-type deserializers.

use petmatch_client::error::ServerRejection;
use petmatch_client::models::{Booking, BookingStatus, LoginResponse, NewSlot, Sitter, SlotPatch};
use petmatch_client::session::Role;
use petmatch_engine::slot::SlotStatus;

// ── Rejection bodies ────────────────────────────────────────────────────────

#[test]
fn detail_bodies_are_surfaced_verbatim() {
    let rejection = ServerRejection::from_body(r#"{"detail": "Not found."}"#);
    assert_eq!(rejection.to_string(), "Not found.");
}

#[test]
fn non_field_errors_are_joined() {
    let rejection = ServerRejection::from_body(
        r#"{"non_field_errors": ["Sitter is not available for the requested time."]}"#,
    );
    assert_eq!(
        rejection.to_string(),
        "Sitter is not available for the requested time."
    );
}

#[test]
fn field_errors_are_scoped_and_displayable() {
    let rejection = ServerRejection::from_body(
        r#"{"start_ts": ["End time must be after start time."], "price_quote": ["A valid number is required."]}"#,
    );

    assert_eq!(
        rejection.field("start_ts"),
        Some(&["End time must be after start time.".to_string()][..])
    );
    assert_eq!(rejection.field("end_ts"), None);
    assert_eq!(
        rejection.to_string(),
        "price_quote: A valid number is required.; start_ts: End time must be after start time."
    );
}

#[test]
fn error_key_bodies_are_surfaced() {
    // The login endpoint reports failures as {"error": "..."}.
    let rejection = ServerRejection::from_body(r#"{"error": "Invalid credentials"}"#);
    assert_eq!(rejection.to_string(), "Invalid credentials");
}

#[test]
fn unparseable_bodies_fall_back_to_a_generic_message() {
    for body in ["<html>502</html>", "", "[\"bare list\"]"] {
        let rejection = ServerRejection::from_body(body);
        assert_eq!(rejection.to_string(), "the server rejected the request");
    }
}

// ── Wire types ──────────────────────────────────────────────────────────────

#[test]
fn bookings_deserialize_with_decimal_strings() {
    // DRF serializes DecimalField as a string.
    let json = r#"{
        "id": 12,
        "owner_id": 4,
        "sitter_id": 9,
        "start_ts": "2024-06-01T10:00:00Z",
        "end_ts": "2024-06-01T14:00:00Z",
        "price_quote": "120.50",
        "status": "requested",
        "created_at": "2024-05-28T09:00:00Z",
        "updated_at": "2024-05-28T09:00:00Z"
    }"#;

    let booking: Booking = serde_json::from_str(json).unwrap();
    assert_eq!(booking.price_quote, 120.50);
    assert_eq!(booking.status, BookingStatus::Requested);
}

#[test]
fn sitter_cards_tolerate_missing_optional_fields() {
    let json = r#"{"id": 3, "display_name": "Ana"}"#;

    let sitter: Sitter = serde_json::from_str(json).unwrap();
    assert_eq!(sitter.id, 3);
    assert!(sitter.tags.is_empty());
    assert!(sitter.rate_hourly.is_none());

    let full = r#"{
        "id": 4,
        "display_name": "Bo",
        "rate_hourly": "35.00",
        "avg_rating": 4.6,
        "tags": ["Overnight Care"],
        "specialties": ["dogs"]
    }"#;
    let sitter: Sitter = serde_json::from_str(full).unwrap();
    assert_eq!(sitter.rate_hourly, Some(35.0));
}

#[test]
fn login_response_carries_token_and_role() {
    let json = r#"{
        "token": "abc123",
        "user": {"id": 7, "username": "ana", "email": "ana@example.com", "role": "OWNER"}
    }"#;

    let login: LoginResponse = serde_json::from_str(json).unwrap();
    assert_eq!(login.token, "abc123");
    assert_eq!(login.user.role, Role::Owner);
}

#[test]
fn slot_writes_use_the_api_field_names() {
    let slot = NewSlot {
        sitter: 9,
        start_ts: "2024-06-01T08:00:00Z".parse().unwrap(),
        end_ts: "2024-06-01T20:00:00Z".parse().unwrap(),
        status: SlotStatus::Open,
        is_recurring: false,
    };

    let body = serde_json::to_value(&slot).unwrap();
    assert_eq!(body["status"], "open");
    assert_eq!(body["start_ts"], "2024-06-01T08:00:00Z");
    assert_eq!(body["end_ts"], "2024-06-01T20:00:00Z");

    // Patches only carry the fields being changed.
    let patch = SlotPatch {
        status: Some(SlotStatus::Blocked),
        ..SlotPatch::default()
    };
    let body = serde_json::to_value(&patch).unwrap();
    assert_eq!(body["status"], "blocked");
    assert!(body.get("start_ts").is_none());
    assert!(body.get("end_ts").is_none());
}
