// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-in callback and logout.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use super::pages::{error_page, respond};
use crate::gate::routes::LANDING_PATH;
use crate::session::{decode, CookieStore, Credential, CredentialStore};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub token: Option<String>,
}

/// `GET /auth/callback?token=…`
///
/// Stores the token handed over by the backend and sends the browser on to
/// the dashboard. The redirect also drops the token from the address bar.
pub async fn auth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let routes = state.gate.routes();

    let Some(raw) = params.token.filter(|t| !t.is_empty()) else {
        return Redirect::to(routes.login_path()).into_response();
    };

    let credential = match Credential::parse(&raw) {
        Ok(credential) => credential,
        Err(e) => {
            warn!(reason = e.code(), "Rejected token from sign-in callback");
            return respond(
                StatusCode::BAD_REQUEST,
                error_page("Failed to process authentication"),
            );
        }
    };

    let subject = decode(credential.as_str()).map(|claims| claims.sub);

    let mut store = CookieStore::new(jar).with_secure(state.cookie_secure);
    store.set(credential);

    if !store.is_authenticated() {
        warn!("Token was not retained by credential storage");
        return respond(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_page("Failed to store authentication token"),
        );
    }

    info!(user = subject.as_deref().unwrap_or("<opaque>"), "Signed in");
    (store.into_jar(), Redirect::to(routes.dashboard_path())).into_response()
}

/// `POST /logout`
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let mut store = CookieStore::new(jar);
    store.clear();
    info!("Signed out");
    (store.into_jar(), Redirect::to(LANDING_PATH))
}
