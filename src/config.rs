// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Bind IP address, IPv4 or IPv6 | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `API_URL` | Assistant backend base URL | `http://localhost:8000/api/v1` |
//! | `TLS_CERT_PATH` | PEM certificate chain; enables HTTPS with `TLS_KEY_PATH` | unset |
//! | `TLS_KEY_PATH` | PEM private key | unset |
//! | `COOKIE_SECURE` | Mark the token cookie `Secure` | `true` with TLS, else `false` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::client::DEFAULT_API_URL;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const API_URL_ENV: &str = "API_URL";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const COOKIE_SECURE_ENV: &str = "COOKIE_SECURE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("{0} and {1} must be set together")]
    Incomplete(&'static str, &'static str),
}

/// PEM files for HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Portal settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub bind_addr: SocketAddr,
    pub api_url: String,
    pub tls: Option<TlsPaths>,
    pub cookie_secure: bool,
}

impl PortalConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let ip: IpAddr = host.parse().map_err(|e: AddrParseError| ConfigError::Invalid {
            name: HOST_ENV,
            reason: e.to_string(),
        })?;
        let bind_addr = SocketAddr::new(ip, port);

        let api_url = get(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let parsed = url::Url::parse(&api_url).map_err(|e| ConfigError::Invalid {
            name: API_URL_ENV,
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: API_URL_ENV,
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::Incomplete(TLS_CERT_PATH_ENV, TLS_KEY_PATH_ENV)),
        };

        let cookie_secure = match get(COOKIE_SECURE_ENV) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                name: COOKIE_SECURE_ENV,
                reason: format!("expected true/false, got `{raw}`"),
            })?,
            None => tls.is_some(),
        };

        Ok(Self {
            bind_addr,
            api_url,
            tls,
            cookie_secure,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<PortalConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PortalConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.api_url, "http://localhost:8000/api/v1");
        assert!(config.tls.is_none());
        assert!(!config.cookie_secure);
    }

    #[test]
    fn explicit_values() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8443"),
            ("API_URL", "https://api.example.com/api/v1"),
            ("TLS_CERT_PATH", "/etc/portal/cert.pem"),
            ("TLS_KEY_PATH", "/etc/portal/key.pem"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8443".parse().unwrap());
        assert_eq!(config.api_url, "https://api.example.com/api/v1");
        assert_eq!(
            config.tls,
            Some(TlsPaths {
                cert: "/etc/portal/cert.pem".into(),
                key: "/etc/portal/key.pem".into(),
            })
        );
        assert!(config.cookie_secure);
    }

    #[test]
    fn ipv6_hosts_are_accepted() {
        let config = load(&[("HOST", "::"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.bind_addr, "[::]:8080".parse().unwrap());

        let config = load(&[("HOST", "::1")]).unwrap();
        assert_eq!(config.bind_addr, "[::1]:3000".parse().unwrap());
    }

    #[test]
    fn invalid_host_is_rejected() {
        assert!(matches!(
            load(&[("HOST", "localhost:80")]),
            Err(ConfigError::Invalid { name: "HOST", .. })
        ));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("PORT", "  "), ("API_URL", "")]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        assert!(matches!(
            load(&[("API_URL", "not a url")]),
            Err(ConfigError::Invalid { name: "API_URL", .. })
        ));
        assert!(matches!(
            load(&[("API_URL", "ftp://backend/api")]),
            Err(ConfigError::Invalid { name: "API_URL", .. })
        ));
    }

    #[test]
    fn half_configured_tls_is_rejected() {
        assert_eq!(
            load(&[("TLS_CERT_PATH", "/cert.pem")]),
            Err(ConfigError::Incomplete("TLS_CERT_PATH", "TLS_KEY_PATH"))
        );
    }

    #[test]
    fn cookie_secure_override() {
        assert!(load(&[("COOKIE_SECURE", "true")]).unwrap().cookie_secure);
        assert!(!load(&[
            ("TLS_CERT_PATH", "/c"),
            ("TLS_KEY_PATH", "/k"),
            ("COOKIE_SECURE", "off")
        ])
        .unwrap()
        .cookie_secure);
        assert!(load(&[("COOKIE_SECURE", "maybe")]).is_err());
    }
}
