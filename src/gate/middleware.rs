// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum middleware applying the [`AccessGate`] to every request.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let gate = AccessGate::default();
//! let app = Router::new()
//!     .route("/dashboard", get(dashboard))
//!     .layer(axum::middleware::from_fn_with_state(gate, access_gate));
//! ```

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use super::{AccessGate, Decision};
use crate::session::{CookieStore, SessionState};

/// Gate middleware.
///
/// Paths on the table's exclusion list pass straight through. For every
/// other path the session is read from the `token` cookie; a missing or
/// malformed cookie counts as anonymous.
///
/// Redirects are 307 for `GET`/`HEAD` and 303 for anything else, so a form
/// post that hits the gate lands on the target page as a plain `GET`.
pub async fn access_gate(
    State(gate): State<AccessGate>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let method = request.method().clone();

    if gate.routes().is_excluded(&path) {
        return next.run(request).await;
    }

    let session = SessionState::from_store(&CookieStore::new(jar));
    let decision = gate.evaluate(session, &path);

    match gate.location(decision) {
        Some(location) => {
            tracing::debug!(
                %method,
                path = %path,
                ?session,
                ?decision,
                location,
                "Access gate redirect"
            );
            redirect(&method, location).into_response()
        }
        None => {
            debug_assert_eq!(decision, Decision::Allow);
            next.run(request).await
        }
    }
}

fn redirect(method: &Method, location: &str) -> Redirect {
    if *method == Method::GET || *method == Method::HEAD {
        Redirect::temporary(location)
    } else {
        Redirect::to(location)
    }
}
