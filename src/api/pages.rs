// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Server-rendered pages.
//!
//! Markup lives in `templates/`. Every template name ends in `.html`, so
//! minijinja escapes all interpolated values.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment, Value};
use serde::Serialize;
use tracing::error;

use crate::client::{UserInfo, WritingStyle, DEFAULT_MAX_EMAILS};
use crate::state::AppState;

const PRODUCT_NAME: &str = "MyBox";
const NOT_ENOUGH_DATA: &str = "Not enough data";

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("landing.html", include_str!("../../templates/landing.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
];

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

/// Render `name`. Every page context carries `title` and `product`.
fn render(name: &str, page: Value) -> Result<String, minijinja::Error> {
    environment()?.get_template(name)?.render(page)
}

/// Turn a rendered page into a response, or a bare 500 if rendering failed.
pub fn respond(status: StatusCode, page: Result<String, minijinja::Error>) -> Response {
    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /`
pub async fn landing() -> Response {
    respond(StatusCode::OK, landing_page())
}

pub fn landing_page() -> Result<String, minijinja::Error> {
    render(
        "landing.html",
        context! {
            title => "Your AI executive assistant",
            product => PRODUCT_NAME,
        },
    )
}

/// `GET /login`
pub async fn login(State(state): State<AppState>) -> Response {
    respond(StatusCode::OK, login_page(&state.client.login_url()))
}

pub fn login_page(provider_url: &str) -> Result<String, minijinja::Error> {
    render(
        "login.html",
        context! {
            title => "Sign in",
            product => PRODUCT_NAME,
            provider_url => provider_url,
        },
    )
}

/// Error page with a way back to sign-in.
pub fn error_page(message: &str) -> Result<String, minijinja::Error> {
    render(
        "error.html",
        context! {
            title => "Something went wrong",
            product => PRODUCT_NAME,
            message => message,
        },
    )
}

/// Everything the dashboard page shows.
#[derive(Debug, Default)]
pub struct DashboardView<'a> {
    pub user: Option<&'a UserInfo>,
    pub style: Option<&'a WritingStyle>,
    /// Last submitted query, echoed back into the form.
    pub query: Option<&'a str>,
    /// Assistant answer or error text for the last query.
    pub answer: Option<&'a str>,
    /// One-line status message (e.g. e-mail processing started).
    pub notice: Option<&'a str>,
}

#[derive(Serialize)]
struct UserCard<'a> {
    name: &'a str,
    email: &'a str,
    is_active: bool,
}

impl<'a> From<&'a UserInfo> for UserCard<'a> {
    fn from(user: &'a UserInfo) -> Self {
        Self {
            name: user.display_name(),
            email: &user.email,
            is_active: user.is_active,
        }
    }
}

/// Writing style with every missing field replaced by a placeholder.
#[derive(Serialize)]
struct StyleCard<'a> {
    tone: &'a str,
    phrases: Vec<&'a str>,
    greeting: &'a str,
    sign_off: &'a str,
}

impl<'a> From<&'a WritingStyle> for StyleCard<'a> {
    fn from(style: &'a WritingStyle) -> Self {
        let text = |value: &'a Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(NOT_ENOUGH_DATA)
        };
        let phrases = match style.common_phrases.as_deref() {
            Some(phrases) if !phrases.is_empty() => phrases.iter().map(String::as_str).collect(),
            _ => vec![NOT_ENOUGH_DATA],
        };
        Self {
            tone: text(&style.tone),
            phrases,
            greeting: text(&style.greeting_style),
            sign_off: text(&style.sign_off_style),
        }
    }
}

pub fn dashboard_page(view: &DashboardView<'_>) -> Result<String, minijinja::Error> {
    render(
        "dashboard.html",
        context! {
            title => "Dashboard",
            product => PRODUCT_NAME,
            user => view.user.map(UserCard::from),
            style => view.style.map(StyleCard::from),
            query => view.query.unwrap_or_default(),
            answer => view.answer,
            notice => view.notice,
            max_emails => DEFAULT_MAX_EMAILS,
        },
    )
}
