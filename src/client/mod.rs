// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the assistant backend.
//!
//! Every call carries `Authorization: Bearer <token>`. The `try_*` methods
//! report failures as [`ClientError`]; the plain methods log the failure and
//! return `None` so pages can render a fallback instead of failing.

pub mod error;
pub mod models;

pub use error::ClientError;
pub use models::{
    ProcessEmailsRequest, ProcessEmailsResponse, QueryRequest, QueryResponse, UserInfo,
    WritingStyle, DEFAULT_MAX_EMAILS,
};

use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::session::Credential;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct AssistantClient {
    base_url: String,
    http: Client,
}

impl AssistantClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Where the browser starts the Google sign-in flow.
    pub fn login_url(&self) -> String {
        self.endpoint("/auth/login/google")
    }

    // -------------------------------------------------------------------------
    // Sentinel API
    // -------------------------------------------------------------------------

    pub async fn current_user(&self, credential: &Credential) -> Option<UserInfo> {
        sentinel("current_user", self.try_current_user(credential).await)
    }

    pub async fn process_emails(
        &self,
        credential: &Credential,
        max_emails: u32,
    ) -> Option<ProcessEmailsResponse> {
        sentinel(
            "process_emails",
            self.try_process_emails(credential, max_emails).await,
        )
    }

    pub async fn query(
        &self,
        credential: &Credential,
        request: &QueryRequest,
    ) -> Option<QueryResponse> {
        sentinel("query", self.try_query(credential, request).await)
    }

    pub async fn analyze_style(&self, credential: &Credential) -> Option<WritingStyle> {
        sentinel("analyze_style", self.try_analyze_style(credential).await)
    }

    // -------------------------------------------------------------------------
    // Fallible API
    // -------------------------------------------------------------------------

    pub async fn try_current_user(&self, credential: &Credential) -> Result<UserInfo, ClientError> {
        let request = self.http.get(self.endpoint("/auth/me"));
        self.send(request, credential).await
    }

    pub async fn try_process_emails(
        &self,
        credential: &Credential,
        max_emails: u32,
    ) -> Result<ProcessEmailsResponse, ClientError> {
        let request = self
            .http
            .post(self.endpoint("/assistant/process-emails"))
            .json(&ProcessEmailsRequest { max_emails });
        self.send(request, credential).await
    }

    pub async fn try_query(
        &self,
        credential: &Credential,
        query: &QueryRequest,
    ) -> Result<QueryResponse, ClientError> {
        let request = self
            .http
            .post(self.endpoint("/assistant/query"))
            .json(query);
        self.send(request, credential).await
    }

    pub async fn try_analyze_style(
        &self,
        credential: &Credential,
    ) -> Result<WritingStyle, ClientError> {
        let request = self.http.get(self.endpoint("/assistant/analyze-style"));
        self.send(request, credential).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credential: &Credential,
    ) -> Result<T, ClientError> {
        let response = request
            .header(AUTHORIZATION, credential.bearer())
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Collapse a failed call into `None`, logging why.
fn sentinel<T>(operation: &'static str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_unauthorized() => {
            debug!(operation, error = %e, "Backend rejected credential");
            None
        }
        Err(e) => {
            warn!(operation, error = %e, "Backend call failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credential() -> Credential {
        Credential::parse("abc123").unwrap()
    }

    async fn client(server: &MockServer) -> AssistantClient {
        AssistantClient::new(format!("{}/api/v1/", server.uri())).unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        let client = AssistantClient::new("http://backend:8000/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://backend:8000/api/v1");
        assert_eq!(
            client.login_url(),
            "http://backend:8000/api/v1/auth/login/google"
        );
    }

    #[tokio::test]
    async fn current_user_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "ada@example.com",
                "full_name": "Ada Lovelace",
                "is_active": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client(&server).await.current_user(&credential()).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn unauthorized_user_lookup_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "detail": "Token has expired"
            })))
            .mount(&server)
            .await;

        let client = client(&server).await;
        assert!(client.current_user(&credential()).await.is_none());
        let err = client.try_current_user(&credential()).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn failed_query_yields_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/assistant/query"))
            .and(body_json(json!({"query": "summarize today"})))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "detail": "Error processing query"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client(&server).await;
        let request = QueryRequest::new("summarize today");
        assert!(client.query(&credential(), &request).await.is_none());

        match client.try_query(&credential(), &request).await {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert!(body.contains("Error processing query"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_query_returns_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/assistant/query"))
            .and(header("authorization", "Bearer abc123"))
            .and(body_json(json!({
                "query": "invoices",
                "time_window_days": 7
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"response": "Two invoices."})),
            )
            .mount(&server)
            .await;

        let request = QueryRequest {
            time_window_days: Some(7),
            ..QueryRequest::new("invoices")
        };
        let answer = client(&server)
            .await
            .query(&credential(), &request)
            .await
            .unwrap();
        assert_eq!(answer.response, "Two invoices.");
    }

    #[tokio::test]
    async fn process_emails_posts_batch_size() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/assistant/process-emails"))
            .and(body_json(json!({"max_emails": 25})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Email processing started",
                "status": "processing"
            })))
            .mount(&server)
            .await;

        let result = client(&server)
            .await
            .process_emails(&credential(), 25)
            .await
            .unwrap();
        assert_eq!(result.status, "processing");
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/assistant/analyze-style"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client(&server).await;
        assert!(matches!(
            client.try_analyze_style(&credential()).await,
            Err(ClientError::Decode(_))
        ));
        assert!(client.analyze_style(&credential()).await.is_none());
    }

    #[tokio::test]
    async fn unreachable_backend_is_request_error() {
        // Port 9 (discard) is not expected to have an HTTP listener.
        let client = AssistantClient::new("http://127.0.0.1:9/api/v1").unwrap();
        assert!(matches!(
            client.try_current_user(&credential()).await,
            Err(ClientError::Request(_))
        ));
        assert!(client.current_user(&credential()).await.is_none());
    }
}
