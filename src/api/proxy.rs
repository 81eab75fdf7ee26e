// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON passthrough to the assistant backend.
//!
//! Mounted under `/api`, outside the access gate. Each endpoint reads the
//! `token` cookie itself and answers `null` when there is no credential or
//! the backend call fails, so browser code only has to handle "data" and
//! "no data".

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;

use crate::client::{
    ProcessEmailsRequest, ProcessEmailsResponse, QueryRequest, QueryResponse, UserInfo,
    WritingStyle,
};
use crate::error::ApiError;
use crate::session::{CookieStore, CredentialStore};
use crate::state::AppState;

/// Current user, or `null`.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Assistant",
    responses(
        (status = 200, description = "User information or null", body = Option<UserInfo>),
    )
)]
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Json<Option<UserInfo>> {
    let Some(credential) = CookieStore::new(jar).get() else {
        return Json(None);
    };
    Json(state.client.current_user(&credential).await)
}

/// Start background e-mail processing.
#[utoipa::path(
    post,
    path = "/api/assistant/process-emails",
    tag = "Assistant",
    request_body = ProcessEmailsRequest,
    responses(
        (status = 200, description = "Processing status or null", body = Option<ProcessEmailsResponse>),
        (status = 400, description = "max_emails must be positive"),
    )
)]
pub async fn process_emails(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<ProcessEmailsRequest>,
) -> Result<Json<Option<ProcessEmailsResponse>>, ApiError> {
    if request.max_emails == 0 {
        return Err(ApiError::bad_request("max_emails must be positive"));
    }
    let Some(credential) = CookieStore::new(jar).get() else {
        return Ok(Json(None));
    };
    Ok(Json(
        state
            .client
            .process_emails(&credential, request.max_emails)
            .await,
    ))
}

/// Ask the assistant a question.
#[utoipa::path(
    post,
    path = "/api/assistant/query",
    tag = "Assistant",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Assistant answer or null", body = Option<QueryResponse>),
        (status = 422, description = "Empty query"),
    )
)]
pub async fn query(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Option<QueryResponse>>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::unprocessable("query must not be empty"));
    }
    let Some(credential) = CookieStore::new(jar).get() else {
        return Ok(Json(None));
    };
    Ok(Json(state.client.query(&credential, &request).await))
}

/// Writing-style analysis, or `null`.
#[utoipa::path(
    get,
    path = "/api/assistant/analyze-style",
    tag = "Assistant",
    responses(
        (status = 200, description = "Writing style analysis or null", body = Option<WritingStyle>),
    )
)]
pub async fn analyze_style(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Json<Option<WritingStyle>> {
    let Some(credential) = CookieStore::new(jar).get() else {
        return Json(None);
    };
    Json(state.client.analyze_style(&credential).await)
}
