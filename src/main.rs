// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use assistant_portal::{
    api::router,
    client::AssistantClient,
    config::PortalConfig,
    logging::{self, LogFormat},
    state::AppState,
};
use axum_server::tls_rustls::RustlsConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init(LogFormat::from_env());

    let config = match PortalConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let client = match AssistantClient::new(config.api_url.as_str()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build backend client");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(client).with_cookie_secure(config.cookie_secure);
    let app = router(state);
    let addr = config.bind_addr;

    let served = match &config.tls {
        Some(tls) => {
            // Install the ring crypto provider for rustls (must be done before any TLS operations)
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                info!("rustls crypto provider already installed");
            }

            let tls_config = match RustlsConfig::from_pem_file(&tls.cert, &tls.key).await {
                Ok(tls_config) => tls_config,
                Err(e) => {
                    error!(error = %e, cert = %tls.cert.display(), "Failed to load TLS certificate");
                    return ExitCode::FAILURE;
                }
            };

            info!(%addr, api_url = %config.api_url, "Assistant portal listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await
        }
        None => {
            info!(%addr, api_url = %config.api_url, "Assistant portal listening on http (docs at /docs)");
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await
        }
    };

    if let Err(e) = served {
        error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
