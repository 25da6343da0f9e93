//! Sitter availability filtering shared by every screen that needs it.
//!
//! The pieces: a [`SlotSource`] seam over the per-sitter availability fetch,
//! a session-scoped [`AvailabilityIndex`] cache, and the [`SitterFilter`]
//! fan-out that checks each candidate sitter concurrently while preserving
//! input order and superseding stale requests by generation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use futures_util::future::join_all;
use petmatch_engine::{is_window_covered, RequestedWindow, TimeSlot};
use tracing::warn;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Sitter;

/// Source of one sitter's slots. [`ApiClient`] is the production
/// implementation; tests substitute in-memory fakes.
#[async_trait]
pub trait SlotSource: Send + Sync {
    async fn slots_for_sitter(&self, sitter_id: i64) -> Result<Vec<TimeSlot>>;
}

#[async_trait]
impl SlotSource for ApiClient {
    async fn slots_for_sitter(&self, sitter_id: i64) -> Result<Vec<TimeSlot>> {
        self.sitter_slots(sitter_id).await
    }
}

/// Session-scoped cache of each sitter's slot list.
///
/// Lazily filled on first lookup, invalidated only explicitly — no TTL.
/// Two concurrent lookups for the same sitter may both fetch; the last
/// insert wins, which is harmless because the data is read-only within a
/// session.
#[derive(Default)]
pub struct AvailabilityIndex {
    slots: Mutex<HashMap<i64, Arc<Vec<TimeSlot>>>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached slot list for `sitter_id`, fetching through `source` on a
    /// miss. The lock is never held across the fetch.
    pub async fn slots(
        &self,
        source: &dyn SlotSource,
        sitter_id: i64,
    ) -> Result<Arc<Vec<TimeSlot>>> {
        if let Some(cached) = self.lock().get(&sitter_id).cloned() {
            return Ok(cached);
        }

        let fetched = Arc::new(source.slots_for_sitter(sitter_id).await?);
        self.lock().insert(sitter_id, Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Forget one sitter's cached slots so the next lookup refetches.
    pub fn invalidate(&self, sitter_id: i64) {
        self.lock().remove(&sitter_id);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, Arc<Vec<TimeSlot>>>> {
        // The cache stays usable even if a holder panicked mid-insert.
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Result of one filter request.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The newest result; safe to publish.
    Fresh(Vec<Sitter>),
    /// A newer request started while this one ran; discard this result.
    Superseded,
}

/// Availability filter over a candidate sitter list.
///
/// Lookups fan out concurrently (one per sitter) and fan back in preserving
/// the input order — callers paginate by position, so order is part of the
/// contract. Each call takes a new generation; a call that finishes after a
/// newer one started reports [`FilterOutcome::Superseded`] instead of a
/// sitter list, regardless of completion order.
#[derive(Default)]
pub struct SitterFilter {
    index: AvailabilityIndex,
    generation: AtomicU64,
    in_flight: AtomicUsize,
}

impl SitterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &AvailabilityIndex {
        &self.index
    }

    /// Whether any filter request is still running, for "checking
    /// availability" indicators.
    pub fn is_checking(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Filter `sitters` down to those whose availability covers `window`.
    ///
    /// With no window the input is returned unchanged — availability
    /// filtering is opt-in. A sitter whose slot fetch fails is excluded
    /// (fail closed) without aborting the checks for the other sitters.
    pub async fn filter_available(
        &self,
        source: &dyn SlotSource,
        sitters: &[Sitter],
        window: Option<&RequestedWindow>,
    ) -> FilterOutcome {
        let Some(window) = window else {
            return FilterOutcome::Fresh(sitters.to_vec());
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlightGuard::enter(&self.in_flight);

        // Fan out one lookup per sitter; join_all yields results in input
        // order no matter which resolves first.
        let checks = join_all(sitters.iter().map(|sitter| async move {
            match self.index.slots(source, sitter.id).await {
                Ok(slots) => is_window_covered(window, &slots),
                Err(err) => {
                    warn!(
                        sitter = sitter.id,
                        error = %err,
                        "availability check failed; excluding sitter"
                    );
                    false
                }
            }
        }))
        .await;

        if self.generation.load(Ordering::SeqCst) != generation {
            return FilterOutcome::Superseded;
        }

        let available = sitters
            .iter()
            .zip(checks)
            .filter(|(_, covered)| *covered)
            .map(|(sitter, _)| sitter.clone())
            .collect();
        FilterOutcome::Fresh(available)
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Client-side specialty/tag filter over an already-fetched sitter list.
///
/// Within a category a sitter matches on ANY selected value; across
/// categories the criteria combine with AND. Server-side querying is a
/// non-goal at this scale.
#[derive(Debug, Clone, Default)]
pub struct SitterQuery {
    /// Specialty slugs.
    pub specialties: Vec<String>,
    /// Tag names.
    pub tags: Vec<String>,
}

impl SitterQuery {
    pub fn is_empty(&self) -> bool {
        self.specialties.is_empty() && self.tags.is_empty()
    }

    pub fn matches(&self, sitter: &Sitter) -> bool {
        let specialty_ok = self.specialties.is_empty()
            || self
                .specialties
                .iter()
                .any(|wanted| sitter.specialties.contains(wanted));
        let tag_ok =
            self.tags.is_empty() || self.tags.iter().any(|wanted| sitter.tags.contains(wanted));
        specialty_ok && tag_ok
    }

    pub fn apply(&self, sitters: &[Sitter]) -> Vec<Sitter> {
        sitters
            .iter()
            .filter(|sitter| self.matches(sitter))
            .cloned()
            .collect()
    }
}
