// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Best-effort claim extraction for display.
//!
//! The backend issues HS256 JWTs whose `sub` is the user's e-mail. The
//! portal never holds the signing secret, so claims are read without
//! verification and must only be used for presentation.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Claims carried by a backend-issued token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Subject (the user's e-mail address)
    pub sub: String,

    /// Expiration timestamp
    #[serde(default)]
    pub exp: Option<i64>,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Expiry as a timestamp, if the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// Decode the payload of `token` without checking its signature.
///
/// Returns `None` for anything that is not a JWT with a JSON payload
/// containing at least `sub`.
pub fn decode(token: &str) -> Option<TokenClaims> {
    match jsonwebtoken::dangerous::insecure_decode::<TokenClaims>(token) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            tracing::debug!(error = %e, "Token payload could not be decoded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    /// Build an unsigned JWT for tests.
    fn jwt(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{payload}.fake_signature")
    }

    #[test]
    fn decodes_subject_and_expiry() {
        let token = jwt(r#"{"sub":"ada@example.com","exp":1700003600}"#);
        let claims = decode(&token).unwrap();
        assert_eq!(claims.sub, "ada@example.com");
        assert_eq!(claims.exp, Some(1700003600));
        assert_eq!(claims.iat, None);
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1700003600);
    }

    #[test]
    fn expired_token_still_decodes() {
        let token = jwt(r#"{"sub":"ada@example.com","exp":1}"#);
        assert!(decode(&token).is_some());
    }

    #[test]
    fn opaque_token_is_absent() {
        assert!(decode("abc123").is_none());
    }

    #[test]
    fn garbage_segments_are_absent() {
        assert!(decode("a.b.c").is_none());
        assert!(decode("").is_none());
        assert!(decode("..").is_none());
    }

    #[test]
    fn payload_without_subject_is_absent() {
        let token = jwt(r#"{"exp":1700003600}"#);
        assert!(decode(&token).is_none());
    }

    #[test]
    fn non_json_payload_is_absent() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode("not json");
        assert!(decode(&format!("{header}.{payload}.sig")).is_none());
    }
}
