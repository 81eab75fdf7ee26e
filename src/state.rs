// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::extract::FromRef;

use crate::client::AssistantClient;
use crate::gate::AccessGate;

#[derive(Clone)]
pub struct AppState {
    pub gate: AccessGate,
    pub client: Arc<AssistantClient>,
    /// Whether the token cookie is written with `Secure`.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(client: AssistantClient) -> Self {
        Self {
            gate: AccessGate::default(),
            client: Arc::new(client),
            cookie_secure: false,
        }
    }

    pub fn with_gate(mut self, gate: AccessGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }
}

impl FromRef<AppState> for AccessGate {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}
