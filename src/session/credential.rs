// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The bearer token and the cookie that carries it.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;

use super::error::CredentialError;

/// Cookie name holding the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Cookie path scope.
pub const TOKEN_COOKIE_PATH: &str = "/";

/// Token lifetime in seconds (30 days).
pub const TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Upper bound on accepted token length. Browsers cap a cookie at ~4 KiB.
const MAX_TOKEN_LEN: usize = 4096;

/// Token lifetime as a chrono duration.
pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECS)
}

/// A structurally valid bearer token.
///
/// The value is opaque: no signature or claim checks happen here. See
/// [`super::claims::decode`] for best-effort claim extraction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validate a raw token value.
    ///
    /// Accepts non-empty visible ASCII that can travel in a cookie without
    /// quoting: no whitespace, `;`, `,`, `"` or `\`.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        if raw.is_empty() {
            return Err(CredentialError::Missing);
        }
        if raw.len() > MAX_TOKEN_LEN || !raw.bytes().all(is_token_byte) {
            return Err(CredentialError::Malformed);
        }
        Ok(Self(raw.to_string()))
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Build the `token` cookie carrying this credential.
    pub fn to_cookie(&self, secure: bool) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, self.0.clone()))
            .path(TOKEN_COOKIE_PATH)
            .max_age(cookie_max_age())
            .same_site(SameSite::Strict)
            .secure(secure)
            .build()
    }
}

// Tokens must never end up in logs through `{:?}`.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

/// Cookie used to remove the token: same name and path as the original.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE).path(TOKEN_COOKIE_PATH).build()
}

fn cookie_max_age() -> time::Duration {
    time::Duration::seconds(TOKEN_TTL_SECS)
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !matches!(b, b';' | b',' | b'"' | b'\\')
}
