// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential storage.
//!
//! [`CredentialStore`] is the contract the gate and the handlers depend on.
//! Two media implement it:
//!
//! - [`CookieStore`] - the browser cookie jar of the current request. Writes
//!   become `Set-Cookie` headers on the response; expiry is enforced by the
//!   browser through `Max-Age`.
//! - [`MemoryStore`] - an in-process slot with an injectable [`Clock`]. It
//!   applies the same TTL itself and expires lazily on read.

use std::sync::{Arc, Mutex};

use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Duration, Utc};

use super::credential::{removal_cookie, token_ttl, Credential, TOKEN_COOKIE};
use super::error::CredentialError;

/// Storage contract for the single bearer token.
pub trait CredentialStore {
    /// Read the stored credential, reporting why none is available.
    fn load(&self) -> Result<Credential, CredentialError>;

    /// Persist `credential`, replacing any stored one.
    fn set(&mut self, credential: Credential);

    /// Remove the stored credential immediately.
    fn clear(&mut self);

    /// The stored, unexpired, well-formed credential, if any.
    ///
    /// Never fails: every [`CredentialError`] means "absent".
    fn get(&self) -> Option<Credential> {
        match self.load() {
            Ok(credential) => Some(credential),
            Err(CredentialError::Missing) => None,
            Err(e) => {
                tracing::debug!(reason = e.code(), "Treating session as anonymous");
                None
            }
        }
    }

    /// True iff [`CredentialStore::get`] yields a credential.
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

// =============================================================================
// Cookie medium
// =============================================================================

/// Credential store backed by the request's cookie jar.
#[derive(Debug, Clone)]
pub struct CookieStore {
    jar: Option<CookieJar>,
    secure: bool,
}

impl CookieStore {
    /// Wrap a jar extracted from the request.
    pub fn new(jar: CookieJar) -> Self {
        Self {
            jar: Some(jar),
            secure: false,
        }
    }

    /// Build from raw request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::new(CookieJar::from_headers(headers))
    }

    /// A store whose medium cannot be reached.
    ///
    /// Reads report [`CredentialError::StorageUnavailable`] and writes are
    /// dropped.
    pub fn unavailable() -> Self {
        Self {
            jar: None,
            secure: false,
        }
    }

    /// Mark cookies written by this store as `Secure`.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// The jar to return with the response so pending writes are sent.
    pub fn into_jar(self) -> CookieJar {
        self.jar.unwrap_or_default()
    }
}

impl CredentialStore for CookieStore {
    fn load(&self) -> Result<Credential, CredentialError> {
        let jar = self.jar.as_ref().ok_or(CredentialError::StorageUnavailable)?;
        let cookie = jar.get(TOKEN_COOKIE).ok_or(CredentialError::Missing)?;
        Credential::parse(cookie.value())
    }

    fn set(&mut self, credential: Credential) {
        match self.jar.take() {
            Some(jar) => self.jar = Some(jar.add(credential.to_cookie(self.secure))),
            None => tracing::warn!("Credential storage unavailable, token not stored"),
        }
    }

    fn clear(&mut self) {
        if let Some(jar) = self.jar.take() {
            self.jar = Some(jar.remove(removal_cookie()));
        }
    }
}

// =============================================================================
// In-memory medium
// =============================================================================

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

struct StoredCredential {
    credential: Credential,
    issued_at: DateTime<Utc>,
}

/// In-process credential slot with lazy expiry.
pub struct MemoryStore<C: Clock = SystemClock> {
    slot: Option<StoredCredential>,
    clock: C,
    ttl: Duration,
}

impl MemoryStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryStore<C> {
    /// Store using `clock` and the standard 30-day TTL.
    pub fn with_clock(clock: C) -> Self {
        Self {
            slot: None,
            clock,
            ttl: token_ttl(),
        }
    }

    /// Override the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// When the stored credential stops being returned, if one is stored.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.slot.as_ref().map(|s| s.issued_at + self.ttl)
    }
}

impl<C: Clock> CredentialStore for MemoryStore<C> {
    fn load(&self) -> Result<Credential, CredentialError> {
        let stored = self.slot.as_ref().ok_or(CredentialError::Missing)?;
        if self.clock.now() >= stored.issued_at + self.ttl {
            return Err(CredentialError::Missing);
        }
        Ok(stored.credential.clone())
    }

    fn set(&mut self, credential: Credential) {
        self.slot = Some(StoredCredential {
            credential,
            issued_at: self.clock.now(),
        });
    }

    fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::response::IntoResponse;
    use chrono::TimeZone;

    fn credential(raw: &str) -> Credential {
        Credential::parse(raw).unwrap()
    }

    fn request_headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        headers
    }

    fn set_cookie_headers(store: CookieStore) -> Vec<String> {
        let response = store.into_jar().into_response();
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    // -------------------------------------------------------------------------
    // CookieStore
    // -------------------------------------------------------------------------

    #[test]
    fn cookie_store_reads_token_cookie() {
        let store = CookieStore::from_headers(&request_headers("theme=dark; token=abc123"));
        assert_eq!(store.get(), Some(credential("abc123")));
        assert!(store.is_authenticated());
    }

    #[test]
    fn cookie_store_without_cookie_is_anonymous() {
        let store = CookieStore::from_headers(&HeaderMap::new());
        assert_eq!(store.load(), Err(CredentialError::Missing));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn cookie_store_rejects_empty_token() {
        let store = CookieStore::from_headers(&request_headers("token="));
        assert!(store.get().is_none());
    }

    #[test]
    fn cookie_store_rejects_malformed_token() {
        let store = CookieStore::from_headers(&request_headers("token=a\"b"));
        assert_eq!(store.load(), Err(CredentialError::Malformed));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn unavailable_store_degrades_to_absent() {
        let mut store = CookieStore::unavailable();
        assert_eq!(store.load(), Err(CredentialError::StorageUnavailable));
        assert!(store.get().is_none());

        store.set(credential("abc123"));
        assert!(!store.is_authenticated());
        store.clear();
        assert!(set_cookie_headers(store).is_empty());
    }

    #[test]
    fn cookie_store_set_then_get_round_trips() {
        let mut store = CookieStore::from_headers(&HeaderMap::new());
        store.set(credential("abc123"));
        assert_eq!(store.get(), Some(credential("abc123")));
    }

    #[test]
    fn cookie_store_set_overwrites() {
        let mut store = CookieStore::from_headers(&request_headers("token=old"));
        store.set(credential("new"));
        assert_eq!(store.get(), Some(credential("new")));
    }

    #[test]
    fn cookie_store_set_emits_cookie_attributes() {
        let mut store = CookieStore::from_headers(&HeaderMap::new());
        store.set(credential("abc123"));

        let headers = set_cookie_headers(store);
        assert_eq!(headers.len(), 1);
        let header = &headers[0];
        assert!(header.starts_with("token=abc123"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=2592000"));
        assert!(header.contains("SameSite=Strict"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn secure_cookie_store_marks_cookie_secure() {
        let mut store = CookieStore::from_headers(&HeaderMap::new()).with_secure(true);
        store.set(credential("abc123"));
        let headers = set_cookie_headers(store);
        assert!(headers[0].contains("Secure"));
    }

    #[test]
    fn cookie_store_clear_expires_cookie() {
        let mut store = CookieStore::from_headers(&request_headers("token=abc123"));
        store.clear();
        assert!(store.get().is_none());

        let headers = set_cookie_headers(store);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("token="));
        assert!(headers[0].contains("Path=/"));
        assert!(headers[0].contains("Max-Age=0"));
    }

    #[test]
    fn cookie_store_clear_is_idempotent() {
        let mut store = CookieStore::from_headers(&request_headers("token=abc123"));
        store.clear();
        assert!(!store.is_authenticated());
        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.get().is_none());
    }

    // -------------------------------------------------------------------------
    // MemoryStore
    // -------------------------------------------------------------------------

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.set(credential("abc123"));
        assert_eq!(store.get(), Some(credential("abc123")));
    }

    #[test]
    fn memory_store_clear_twice_stays_anonymous() {
        let mut store = MemoryStore::new();
        store.set(credential("abc123"));
        store.clear();
        assert!(store.get().is_none());
        store.clear();
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn memory_store_expires_after_ttl() {
        let clock = ManualClock::new(start());
        let mut store = MemoryStore::with_clock(clock.clone());
        store.set(credential("abc123"));

        clock.advance(Duration::days(29));
        assert!(store.is_authenticated());

        clock.advance(Duration::days(1) + Duration::seconds(1));
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn memory_store_expiry_boundary_is_exclusive() {
        let clock = ManualClock::new(start());
        let mut store = MemoryStore::with_clock(clock.clone()).with_ttl(Duration::seconds(10));
        store.set(credential("abc123"));

        clock.advance(Duration::seconds(9));
        assert!(store.is_authenticated());
        clock.advance(Duration::seconds(1));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn memory_store_set_restarts_ttl() {
        let clock = ManualClock::new(start());
        let mut store = MemoryStore::with_clock(clock.clone());
        store.set(credential("first"));
        clock.advance(Duration::days(20));
        store.set(credential("second"));
        clock.advance(Duration::days(20));

        assert_eq!(store.get(), Some(credential("second")));
        assert_eq!(store.expires_at(), Some(start() + Duration::days(50)));
    }

    #[test]
    fn empty_memory_store_has_no_expiry() {
        let store = MemoryStore::new();
        assert!(store.expires_at().is_none());
        assert_eq!(store.load(), Err(CredentialError::Missing));
    }
}
