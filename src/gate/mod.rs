// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Access Gate
//!
//! Decides, per navigation, whether to serve the page or redirect.
//!
//! ## Rules
//!
//! Evaluated in order, first match wins:
//!
//! 1. OAuth callback path → allow (it must run before a token exists)
//! 2. Anonymous visitor on a protected path → redirect to login
//! 3. Authenticated visitor on a public path → redirect to dashboard
//! 4. Everything else → allow
//!
//! The gate holds no session state. Callers derive a [`SessionState`] from
//! a [`crate::session::CredentialStore`] and pass it in.

pub mod middleware;
pub mod routes;

pub use middleware::access_gate;
pub use routes::{PathMatch, RouteClass, RouteRule, RouteTable};

use crate::session::SessionState;

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

/// The per-request access decision function.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    routes: RouteTable,
}

impl AccessGate {
    pub fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide what to do with a request for `path`.
    pub fn evaluate(&self, session: SessionState, path: &str) -> Decision {
        match (self.routes.classify(path), session) {
            (RouteClass::Callback, _) => Decision::Allow,
            (RouteClass::Protected, SessionState::Anonymous) => Decision::RedirectToLogin,
            (RouteClass::Public, SessionState::Authenticated) => Decision::RedirectToDashboard,
            _ => Decision::Allow,
        }
    }

    /// Redirect target for `decision`, or `None` for [`Decision::Allow`].
    pub fn location(&self, decision: Decision) -> Option<&str> {
        match decision {
            Decision::Allow => None,
            Decision::RedirectToLogin => Some(self.routes.login_path()),
            Decision::RedirectToDashboard => Some(self.routes.dashboard_path()),
        }
    }
}
