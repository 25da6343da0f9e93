//! Wire types for the marketplace API.
//!
//! Shapes follow the server's serializers. Decimal fields (`price_quote`,
//! `rate_hourly`) arrive as strings; [`de_decimal`] accepts either a string
//! or a bare number.

use chrono::{DateTime, Utc};
use petmatch_engine::SlotStatus;
use serde::{Deserialize, Deserializer, Serialize};

use crate::session::Role;

/// Public sitter card as returned by `GET profiles/sitters/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sitter {
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub rate_hourly: Option<f64>,
    #[serde(default)]
    pub home_zip: Option<String>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Tag names.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Specialty slugs.
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// A pet on an owner's profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: String,
    pub age: i32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// Server-owned booking lifecycle states. The client never writes these
/// directly; transitions go through the dedicated action endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Requested,
    Confirmed,
    Completed,
    Canceled,
}

/// A persisted booking as returned by `GET bookings/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub owner_id: i64,
    pub sitter_id: i64,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    #[serde(deserialize_with = "de_decimal")]
    pub price_quote: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review left by an owner after a completed booking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    pub id: i64,
    pub booking: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub owner_name: String,
    pub sitter_id: i64,
    #[serde(default)]
    pub sitter_name: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST reviews/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub booking: i64,
    pub sitter: i64,
    pub rating: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// Body for `POST availability/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSlot {
    pub sitter: i64,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    pub status: SlotStatus,
    pub is_recurring: bool,
}

/// Partial update for `PATCH availability/{id}/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SlotPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_ts: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ts: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SlotStatus>,
}

/// `POST accounts/login/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn de_opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => Some(s.trim().parse().map_err(serde::de::Error::custom)?),
    })
}
