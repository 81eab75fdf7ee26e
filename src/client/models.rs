// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request and response bodies of the assistant backend.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default batch size for e-mail processing.
pub const DEFAULT_MAX_EMAILS: u32 = 100;

/// `GET /auth/me` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl UserInfo {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// `POST /assistant/process-emails` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProcessEmailsRequest {
    pub max_emails: u32,
}

impl Default for ProcessEmailsRequest {
    fn default() -> Self {
        Self {
            max_emails: DEFAULT_MAX_EMAILS,
        }
    }
}

/// `POST /assistant/process-emails` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProcessEmailsResponse {
    pub message: String,
    pub status: String,
}

/// `POST /assistant/query` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    pub query: String,
    /// Restrict retrieval to the last N days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window_days: Option<u32>,
    /// Restrict retrieval to one source (e.g. `email`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            time_window_days: None,
            source_type: None,
        }
    }
}

/// `POST /assistant/query` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    pub response: String,
}

/// `GET /assistant/analyze-style` response.
///
/// Every field is optional; the backend omits what it could not infer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WritingStyle {
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub common_phrases: Option<Vec<String>>,
    #[serde(default)]
    pub greeting_style: Option<String>,
    #[serde(default)]
    pub sign_off_style: Option<String>,
    #[serde(default)]
    pub vocabulary_preferences: Option<Vec<String>>,
}
