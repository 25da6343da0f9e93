//! Explicit session state for the authenticated party.
//!
//! Replaces ad-hoc ambient credential reads: populated at login, cleared at
//! logout or on any 401, and handed to whatever needs it instead of being
//! re-read from global storage.

use std::sync::RwLock;

use serde::Deserialize;

/// Marketplace role attached to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Owner,
    Sitter,
}

#[derive(Debug, Clone)]
struct Credentials {
    token: String,
    role: Option<Role>,
}

/// Thread-safe holder for the current token and role.
#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<Option<Credentials>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install credentials, replacing any existing ones.
    pub fn set(&self, token: impl Into<String>, role: Option<Role>) {
        *self.write() = Some(Credentials {
            token: token.into(),
            role,
        });
    }

    /// Drop all credential state. Called at logout and on any 401.
    pub fn clear(&self) {
        *self.write() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.read().as_ref().and_then(|c| c.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    // The lock only guards a small credential record; a poisoned lock still
    // holds usable state, so recover instead of panicking.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Credentials>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Credentials>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
