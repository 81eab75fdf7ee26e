// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    client::{
        ProcessEmailsRequest, ProcessEmailsResponse, QueryRequest, QueryResponse, UserInfo,
        WritingStyle,
    },
    gate::{
        middleware::access_gate,
        routes::{CALLBACK_PATH, DASHBOARD_PATH, LANDING_PATH, LOGIN_PATH},
    },
    state::AppState,
};

pub mod dashboard;
pub mod health;
pub mod pages;
pub mod proxy;
pub mod session;

pub fn router(state: AppState) -> Router {
    let gate = state.gate.clone();

    let api_routes = Router::new()
        .route("/me", get(proxy::me))
        .route("/assistant/process-emails", post(proxy::process_emails))
        .route("/assistant/query", post(proxy::query))
        .route("/assistant/analyze-style", get(proxy::analyze_style));

    Router::new()
        .route(LANDING_PATH, get(pages::landing))
        .route(LOGIN_PATH, get(pages::login))
        .route(CALLBACK_PATH, get(session::auth_callback))
        .route("/logout", post(session::logout))
        .route(DASHBOARD_PATH, get(dashboard::dashboard))
        .route("/dashboard/query", post(dashboard::submit_query))
        .route(
            "/dashboard/process-emails",
            post(dashboard::submit_process_emails),
        )
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(gate, access_gate))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        proxy::me,
        proxy::process_emails,
        proxy::query,
        proxy::analyze_style
    ),
    components(
        schemas(
            health::HealthResponse,
            UserInfo,
            ProcessEmailsRequest,
            ProcessEmailsResponse,
            QueryRequest,
            QueryResponse,
            WritingStyle
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Assistant", description = "JSON passthrough to the assistant backend")
    )
)]
struct ApiDoc;
