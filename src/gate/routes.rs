// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static route classification for the access gate.
//!
//! Public paths form an explicit allow-list; anything not on it is
//! protected, so a newly added page is gated until someone lists it here.
//!
//! ## Matching
//!
//! | Rule | Matches | Does not match |
//! |------|---------|----------------|
//! | `Exact("/")` | `/` | `/about` |
//! | `Exact("/pricing")` | `/pricing`, `/pricing/` | `/pricing/eu` |
//! | `Segment("/login")` | `/login`, `/login/`, `/login/sso` | `/login-help` |

/// Login page path.
pub const LOGIN_PATH: &str = "/login";

/// Application home for authenticated visitors.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// OAuth callback path receiving `?token=`.
pub const CALLBACK_PATH: &str = "/auth/callback";

/// Landing page path.
pub const LANDING_PATH: &str = "/";

/// Path prefixes the gate never sees.
pub const DEFAULT_EXCLUSIONS: &[&str] =
    &["/api", "/static", "/health", "/docs", "/api-doc", "/favicon.ico"];

/// How a route entry is compared against a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatch {
    /// The path equals the entry, ignoring one trailing `/`.
    Exact,
    /// The path equals the entry or continues it with `/`.
    Segment,
}

/// A single allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub path: String,
    pub matching: PathMatch,
}

impl RouteRule {
    pub fn exact(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            matching: PathMatch::Exact,
        }
    }

    pub fn segment(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            matching: PathMatch::Segment,
        }
    }

    /// Check whether `path` is covered by this rule.
    pub fn matches(&self, path: &str) -> bool {
        let rule = self.path.as_str();
        match self.matching {
            PathMatch::Exact => path == rule || (rule != "/" && path.strip_suffix('/') == Some(rule)),
            PathMatch::Segment => match path.strip_prefix(rule) {
                Some(rest) => rest.is_empty() || rest.starts_with('/') || rule.ends_with('/'),
                None => false,
            },
        }
    }
}

/// Access classification of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// The OAuth callback: always reachable.
    Callback,
    /// Reachable without a credential.
    Public,
    /// Requires a credential.
    Protected,
}

/// The static route configuration consulted by the gate.
#[derive(Debug, Clone)]
pub struct RouteTable {
    login: String,
    dashboard: String,
    callback: RouteRule,
    public: Vec<RouteRule>,
    excluded: Vec<RouteRule>,
}

impl RouteTable {
    /// Build a table with the given redirect targets and callback.
    ///
    /// The login path and the callback are public. Add the rest with
    /// [`RouteTable::with_public`].
    pub fn new(
        login: impl Into<String>,
        dashboard: impl Into<String>,
        callback: impl Into<String>,
    ) -> Self {
        let login = login.into();
        let callback = RouteRule::segment(callback);
        Self {
            public: vec![RouteRule::segment(login.clone()), callback.clone()],
            login,
            dashboard: dashboard.into(),
            callback,
            excluded: Vec::new(),
        }
    }

    /// Add a public allow-list entry.
    pub fn with_public(mut self, rule: RouteRule) -> Self {
        self.public.push(rule);
        self
    }

    /// Exclude a path prefix from gating entirely.
    pub fn with_exclusion(mut self, prefix: impl Into<String>) -> Self {
        self.excluded.push(RouteRule::segment(prefix));
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login
    }

    pub fn dashboard_path(&self) -> &str {
        &self.dashboard
    }

    pub fn is_callback(&self, path: &str) -> bool {
        self.callback.matches(path)
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|rule| rule.matches(path))
    }

    /// True if the gate should not run for `path` at all.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded.iter().any(|rule| rule.matches(path))
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if self.is_callback(path) {
            RouteClass::Callback
        } else if self.is_public(path) {
            RouteClass::Public
        } else {
            RouteClass::Protected
        }
    }
}

impl Default for RouteTable {
    /// The portal's routes: landing, login and callback are public.
    fn default() -> Self {
        DEFAULT_EXCLUSIONS.iter().fold(
            RouteTable::new(LOGIN_PATH, DASHBOARD_PATH, CALLBACK_PATH)
                .with_public(RouteRule::exact(LANDING_PATH)),
            |table, prefix| table.with_exclusion(*prefix),
        )
    }
}
