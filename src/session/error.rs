// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential errors.
//!
//! None of these reach the browser. The gate and the handlers treat every
//! variant as an anonymous session; the variants exist so that logs and
//! tests can tell the cases apart.

/// Why a credential could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// No token is stored.
    #[error("no credential is stored")]
    Missing,

    /// A token is stored but is not structurally valid.
    #[error("stored credential is malformed")]
    Malformed,

    /// The storage medium cannot be reached in this context.
    #[error("credential storage is unavailable")]
    StorageUnavailable,
}

impl CredentialError {
    /// Short machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            CredentialError::Missing => "missing",
            CredentialError::Malformed => "malformed",
            CredentialError::StorageUnavailable => "storage_unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            CredentialError::Missing.code(),
            CredentialError::Malformed.code(),
            CredentialError::StorageUnavailable.code(),
        ];
        assert_eq!(codes, ["missing", "malformed", "storage_unavailable"]);
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(
            CredentialError::StorageUnavailable.to_string(),
            "credential storage is unavailable"
        );
    }
}
