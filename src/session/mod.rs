// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Module
//!
//! The bearer token lifecycle for the portal.
//!
//! ## Token Lifecycle
//!
//! 1. The backend finishes the Google OAuth dance and redirects the browser
//!    to `/auth/callback?token=<JWT>`
//! 2. The callback handler validates the token structurally and stores it
//!    in the `token` cookie (30 days, `Path=/`, `SameSite=Strict`)
//! 3. Every navigation re-reads the cookie to derive a [`SessionState`]
//! 4. Logout removes the cookie; the browser drops it on its own after TTL
//!
//! ## Security
//!
//! - The portal does not verify token signatures; the backend does that on
//!   every API call
//! - Storage failures and malformed tokens degrade to [`SessionState::Anonymous`]

pub mod claims;
pub mod credential;
pub mod error;
pub mod store;

pub use claims::{decode, TokenClaims};
pub use credential::Credential;
pub use error::CredentialError;
pub use store::{Clock, CookieStore, CredentialStore, ManualClock, MemoryStore, SystemClock};

/// Logical session state, derived from a store on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl SessionState {
    /// Derive the state from whatever `store` currently holds.
    pub fn from_store<S: CredentialStore + ?Sized>(store: &S) -> Self {
        if store.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == SessionState::Authenticated
    }
}
