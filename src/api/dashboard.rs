// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Dashboard page and its form actions.
//!
//! These routes sit behind the access gate, so a credential cookie is
//! present. The backend may still reject it (its tokens expire long before
//! the cookie does); in that case the cookie is cleared and the visitor is
//! sent to sign in again, which keeps the gate from bouncing them straight
//! back here.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::warn;

use super::pages::{dashboard_page, respond, DashboardView};
use crate::client::{QueryRequest, UserInfo, DEFAULT_MAX_EMAILS};
use crate::session::{CookieStore, Credential, CredentialStore};
use crate::state::AppState;

const QUERY_FAILED: &str = "Error getting response from assistant";
const NO_RESPONSE: &str = "No response from assistant";

/// Outcome of resolving the visitor for a dashboard request.
enum Visitor {
    Known(Credential, UserInfo),
    BackendDown,
    SignedOut(Response),
}

async fn resolve_visitor(state: &AppState, jar: CookieJar) -> Visitor {
    let mut store = CookieStore::new(jar);
    let login = state.gate.routes().login_path();

    let Some(credential) = store.get() else {
        return Visitor::SignedOut(Redirect::to(login).into_response());
    };

    match state.client.try_current_user(&credential).await {
        Ok(user) => Visitor::Known(credential, user),
        Err(e) if e.is_unauthorized() => {
            store.clear();
            Visitor::SignedOut((store.into_jar(), Redirect::to(login)).into_response())
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch user info");
            Visitor::BackendDown
        }
    }
}

fn backend_down_page() -> Response {
    respond(
        StatusCode::BAD_GATEWAY,
        dashboard_page(&DashboardView::default()),
    )
}

/// `GET /dashboard`
pub async fn dashboard(State(state): State<AppState>, jar: CookieJar) -> Response {
    match resolve_visitor(&state, jar).await {
        Visitor::Known(credential, user) => {
            let style = state.client.analyze_style(&credential).await;
            respond(
                StatusCode::OK,
                dashboard_page(&DashboardView {
                    user: Some(&user),
                    style: style.as_ref(),
                    ..Default::default()
                }),
            )
        }
        Visitor::BackendDown => backend_down_page(),
        Visitor::SignedOut(response) => response,
    }
}

/// Form body of `POST /dashboard/query`.
///
/// Optional fields arrive as empty strings from plain HTML forms.
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    pub query: String,
    #[serde(default)]
    pub time_window_days: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
}

impl QueryForm {
    /// Backend request, or `None` if the query is blank.
    pub fn to_request(&self) -> Option<QueryRequest> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        Some(QueryRequest {
            query: query.to_string(),
            time_window_days: self
                .time_window_days
                .as_deref()
                .and_then(|d| d.trim().parse().ok()),
            source_type: self
                .source_type
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}

/// `POST /dashboard/query`
pub async fn submit_query(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<QueryForm>,
) -> Response {
    let (credential, user) = match resolve_visitor(&state, jar).await {
        Visitor::Known(credential, user) => (credential, user),
        Visitor::BackendDown => return backend_down_page(),
        Visitor::SignedOut(response) => return response,
    };

    let answer = match form.to_request() {
        Some(request) => match state.client.query(&credential, &request).await {
            Some(result) if !result.response.is_empty() => result.response,
            Some(_) => NO_RESPONSE.to_string(),
            None => QUERY_FAILED.to_string(),
        },
        None => String::new(),
    };

    respond(
        StatusCode::OK,
        dashboard_page(&DashboardView {
            user: Some(&user),
            query: Some(&form.query),
            answer: (!answer.is_empty()).then_some(answer.as_str()),
            ..Default::default()
        }),
    )
}

/// Form body of `POST /dashboard/process-emails`.
#[derive(Debug, Deserialize)]
pub struct ProcessEmailsForm {
    #[serde(default)]
    pub max_emails: Option<String>,
}

impl ProcessEmailsForm {
    pub fn max_emails(&self) -> u32 {
        self.max_emails
            .as_deref()
            .and_then(|m| m.trim().parse::<u32>().ok())
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_MAX_EMAILS)
    }
}

/// `POST /dashboard/process-emails`
pub async fn submit_process_emails(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ProcessEmailsForm>,
) -> Response {
    let (credential, user) = match resolve_visitor(&state, jar).await {
        Visitor::Known(credential, user) => (credential, user),
        Visitor::BackendDown => return backend_down_page(),
        Visitor::SignedOut(response) => return response,
    };

    let notice = match state
        .client
        .process_emails(&credential, form.max_emails())
        .await
    {
        Some(result) => result.message,
        None => "Email processing could not be started".to_string(),
    };

    respond(
        StatusCode::OK,
        dashboard_page(&DashboardView {
            user: Some(&user),
            notice: Some(&notice),
            ..Default::default()
        }),
    )
}
