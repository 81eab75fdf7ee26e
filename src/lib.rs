// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Assistant Portal - browser-facing gateway for the AI executive assistant
//!
//! Serves the public and signed-in pages, keeps the backend bearer token in
//! a cookie and redirects every page navigation according to whether that
//! token is present.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers and router (Axum)
//! - `client` - Assistant backend HTTP client
//! - `gate` - Route classification and the access gate middleware
//! - `session` - Credential parsing, storage and session state

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod session;
pub mod state;
