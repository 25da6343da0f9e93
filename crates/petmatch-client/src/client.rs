//! Asynchronous client for the marketplace REST API.
//!
//! One `ApiClient` per session: it owns the HTTP connection pool and the
//! [`Session`] credentials, attaching `Authorization: Token <key>` to every
//! request once a login has succeeded. Booking status transitions go through
//! the dedicated action endpoints; the client never PATCHes `status`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use petmatch_engine::{BookingRequest, TimeSlot};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, Result, ServerRejection};
use crate::models::{
    Booking, LoginResponse, NewReview, NewSlot, Pet, Review, Sitter, SlotPatch,
};
use crate::session::Session;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the base URL from `PETMATCH_API_URL`, defaulting to the local
    /// development server.
    pub fn from_env() -> Self {
        match env::var("PETMATCH_API_URL") {
            Ok(url) => Self::new(url),
            Err(_) => {
                debug!("PETMATCH_API_URL not set, using default: {DEFAULT_BASE_URL}");
                Self::new(DEFAULT_BASE_URL)
            }
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// REST client over one marketplace API base URL.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            session: Arc::new(Session::new()),
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    // ── Auth ────────────────────────────────────────────────────────────────

    /// Exchange credentials for a token and install it in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::json!({ "username": username, "password": password });
        let login: LoginResponse = self.post_json("accounts/login/", &body).await?;
        self.session.set(&login.token, Some(login.user.role));
        Ok(login)
    }

    /// Drop the local credential state. Purely local; the token itself stays
    /// valid server-side.
    pub fn logout(&self) {
        self.session.clear();
    }

    // ── Sitters & pets ──────────────────────────────────────────────────────

    pub async fn sitters(&self) -> Result<Vec<Sitter>> {
        self.get_json("profiles/sitters/", &[]).await
    }

    pub async fn sitter(&self, sitter_id: i64) -> Result<Sitter> {
        self.get_json(&format!("profiles/sitters/{sitter_id}/"), &[])
            .await
    }

    pub async fn owner_pets(&self, owner_id: i64) -> Result<Vec<Pet>> {
        self.get_json(&format!("profiles/owners/{owner_id}/pets/"), &[])
            .await
    }

    // ── Availability ────────────────────────────────────────────────────────

    /// One sitter's declared slots.
    pub async fn sitter_slots(&self, sitter_id: i64) -> Result<Vec<TimeSlot>> {
        self.get_json("availability/", &[("sitter", sitter_id.to_string())])
            .await
    }

    /// The authenticated sitter's own slots (self-service view).
    pub async fn my_slots(&self) -> Result<Vec<TimeSlot>> {
        self.get_json("availability/", &[("mine", "true".to_string())])
            .await
    }

    pub async fn create_slot(&self, slot: &NewSlot) -> Result<TimeSlot> {
        self.post_json("availability/", slot).await
    }

    pub async fn update_slot(&self, slot_id: i64, patch: &SlotPatch) -> Result<TimeSlot> {
        let response = self
            .authorize(self.http.patch(self.url(&format!("availability/{slot_id}/"))))
            .json(patch)
            .send()
            .await?;
        Ok(self.check(response).await?.json().await?)
    }

    pub async fn delete_slot(&self, slot_id: i64) -> Result<()> {
        let response = self
            .authorize(self.http.delete(self.url(&format!("availability/{slot_id}/"))))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    // ── Bookings ────────────────────────────────────────────────────────────

    /// Bookings visible to the authenticated party (owners see their own,
    /// sitters see bookings referencing them).
    pub async fn bookings(&self) -> Result<Vec<Booking>> {
        self.get_json("bookings/", &[]).await
    }

    pub async fn booking(&self, booking_id: i64) -> Result<Booking> {
        self.get_json(&format!("bookings/{booking_id}/"), &[]).await
    }

    /// Submit a reviewed booking request. The server assigns the id and
    /// `status = requested`.
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        self.post_json("bookings/", request).await
    }

    pub async fn confirm_booking(&self, booking_id: i64) -> Result<Booking> {
        self.booking_action(booking_id, "confirm").await
    }

    pub async fn cancel_booking(&self, booking_id: i64) -> Result<Booking> {
        self.booking_action(booking_id, "cancel").await
    }

    pub async fn complete_booking(&self, booking_id: i64) -> Result<Booking> {
        self.booking_action(booking_id, "complete").await
    }

    async fn booking_action(&self, booking_id: i64, action: &str) -> Result<Booking> {
        let response = self
            .authorize(
                self.http
                    .post(self.url(&format!("bookings/{booking_id}/{action}/"))),
            )
            .send()
            .await?;
        Ok(self.check(response).await?.json().await?)
    }

    // ── Reviews ─────────────────────────────────────────────────────────────

    pub async fn sitter_reviews(&self, sitter_id: i64) -> Result<Vec<Review>> {
        self.get_json("reviews/", &[("sitter", sitter_id.to_string())])
            .await
    }

    pub async fn create_review(&self, review: &NewReview) -> Result<Review> {
        self.post_json("reviews/", review).await
    }

    // ── Plumbing ────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Token {token}")),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?;
        Ok(self.check(response).await?.json().await?)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authorize(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        Ok(self.check(response).await?.json().await?)
    }

    /// Map a non-2xx response into the error taxonomy. A 401 clears the
    /// session before returning, forcing re-authentication.
    async fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("request rejected with 401; clearing session");
            self.session.clear();
            return Err(ApiError::Auth(
                "credentials rejected; sign in again".to_string(),
            ));
        }

        let body = response.text().await.unwrap_or_default();
        let rejection = ServerRejection::from_body(&body);

        if status == StatusCode::BAD_REQUEST || status == StatusCode::CONFLICT {
            return Err(ApiError::Conflict(rejection));
        }

        Err(ApiError::Api {
            status: status.as_u16(),
            message: rejection.to_string(),
        })
    }
}
