// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Backend client errors.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("backend client configuration invalid: {0}")]
    Config(String),

    #[error("backend request failed: {0}")]
    Request(String),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("backend response was invalid: {0}")]
    Decode(String),
}

impl ClientError {
    /// True if the backend rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED
        )
    }
}
