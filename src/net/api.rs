//! REST API client for the portfolio backend.
//!
//! Every request goes through [`ApiClient::send`], which attaches the stored
//! session credential as a bearer header when one is present. There is no
//! retry, caching or request deduplication at this layer.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses surface as [`ApiError::Status`] carrying the backend's
//! raw JSON body unmodified; callers pick out `detail` themselves.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde_json::Value;

use super::transport::{HttpRequest, Method, RequestBody, Transport, TransportError};
use super::types::{LoginResponse, Property, RegisterRequest};
use crate::state::token_store::{StoreError, TokenStore};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const PROPERTIES_PATH: &str = "/properties";

/// Errors produced by API client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Value },

    /// A success body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The session credential could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Backend-supplied `detail` message, if the error body carried one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => body
                .get("detail")
                .and_then(Value::as_str)
                .filter(|detail| !detail.trim().is_empty()),
            _ => None,
        }
    }

    /// HTTP status for backend-reported failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin HTTP wrapper bound to a base URL and a session context.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { transport, base_url, tokens }
    }

    /// The session context this client reads credentials from.
    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Dispatch a request, attaching the bearer credential when present.
    ///
    /// Success bodies that are empty or not JSON decode to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response arrives,
    /// [`ApiError::Status`] for non-2xx responses and [`ApiError::Store`]
    /// when the credential cannot be loaded.
    pub async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<Value, ApiError> {
        let mut headers = Vec::new();
        if let Some(token) = self.tokens.load()? {
            headers.push((reqwest::header::AUTHORIZATION.as_str().to_owned(), token.bearer()));
        }

        tracing::debug!(%method, path, authenticated = !headers.is_empty(), "api request");
        let request = HttpRequest { method, url: self.endpoint(path), headers, body };
        let response = self.transport.send(request).await?;
        let value = parse_body(&response.body);

        if !response.is_success() {
            tracing::debug!(status = response.status, path, "api request rejected");
            return Err(ApiError::Status { status: response.status, body: value });
        }
        Ok(value)
    }

    /// Exchange credentials for a session token via form-encoded `POST /auth/login`.
    ///
    /// The returned response may lack `access_token`; the caller decides
    /// whether that is a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let form = vec![
            ("username".to_owned(), username.to_owned()),
            ("password".to_owned(), password.to_owned()),
        ];
        let value = self.send(Method::POST, LOGIN_PATH, RequestBody::Form(form)).await?;
        Ok(LoginResponse::from_value(&value))
    }

    /// Create an account via JSON `POST /auth/register`. Any 2xx is success.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let payload = RegisterRequest { email: email.to_owned(), password: password.to_owned() };
        let body = serde_json::to_value(&payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::POST, REGISTER_PATH, RequestBody::Json(body)).await?;
        Ok(())
    }

    /// Fetch the property collection via `GET /properties`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend rejects it, or the
    /// body is not an array of properties.
    pub async fn list_properties(&self) -> Result<Vec<Property>, ApiError> {
        let value = self.send(Method::GET, PROPERTIES_PATH, RequestBody::Empty).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or(Value::Null)
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, PoisonError};

    use super::*;
    use crate::net::transport::HttpResponse;
    use crate::state::token_store::MemoryTokenStore;

    pub const TEST_BASE_URL: &str = "http://api.test";

    /// Transport that records requests and replays scripted outcomes in order.
    /// Once the script runs out it answers `200 []`.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        requests: Mutex<Vec<HttpRequest>>,
        yield_before_reply: bool,
    }

    impl MockTransport {
        pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self { responses: Mutex::new(responses.into()), ..Self::default() }
        }

        /// Suspend once before replying so concurrent callers interleave.
        pub fn yielding(mut self) -> Self {
            self.yield_before_reply = true;
            self
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    #[async_trait::async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
            if self.yield_before_reply {
                tokio::task::yield_now().await;
            }
            let next = self.responses.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
            next.unwrap_or_else(|| Ok(HttpResponse::new(200, "[]")))
        }
    }

    pub fn ok(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(status, body.to_string()))
    }

    pub fn connection_refused() -> Result<HttpResponse, TransportError> {
        Err(TransportError("connection refused".to_owned()))
    }

    /// API client over `transport` with an in-memory token store.
    pub fn test_api(transport: Arc<MockTransport>) -> (ApiClient, Arc<MemoryTokenStore>) {
        let tokens = Arc::new(MemoryTokenStore::new());
        let api = ApiClient::new(TEST_BASE_URL, transport, tokens.clone());
        (api, tokens)
    }
}
