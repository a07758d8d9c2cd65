//! HTTP client for the page backend.
//!
//! Thin `reqwest` wrapper for the four endpoints. Status handling and body
//! decoding live in pure `parse_*` helpers so they can be tested without a
//! server.
//!
//! ERROR HANDLING
//! ==============
//! `/login` reports refusals in-band (`success: false`), so its body is
//! decoded whatever the status. The other endpoints treat any non-2xx status
//! as [`ApiError::Status`], carrying the body's `error` text when present.
//! A body that is not JSON at all is [`ApiError::Decode`] whatever the
//! status, so callers report it like a failed connection.

use serde::de::DeserializeOwned;

use super::types::{
    ApiError, AskRequest, AskResponse, ClearContextResponse, ContextInfo, ErrorBody, LoginRequest, LoginResponse,
};

pub const LOGIN_PATH: &str = "/login";
pub const ASK_AI_PATH: &str = "/ask-ai";
pub const CLEAR_CONTEXT_PATH: &str = "/clear-context";
pub const CONTEXT_INFO_PATH: &str = "/context-info";

// =============================================================================
// BACKEND SEAM
// =============================================================================

/// The request/response contract the controller depends on.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn ask_ai(&self, request: &AskRequest) -> Result<AskResponse, ApiError>;

    async fn clear_context(&self) -> Result<ClearContextResponse, ApiError>;

    async fn context_info(&self) -> Result<ContextInfo, ApiError>;
}

// =============================================================================
// HTTP BACKEND
// =============================================================================

/// `reqwest`-backed [`Backend`]. Keeps a cookie store so the session cookie
/// issued by `/login` rides along on later calls.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client rooted at `base_url` (scheme + host + optional port).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read(response: reqwest::Response) -> Result<(u16, String), ApiError> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok((status, text))
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(endpoint(&self.base_url, LOGIN_PATH))
            .json(request)
            .send()
            .await?;
        let (status, text) = Self::read(response).await?;
        parse_login(status, &text)
    }

    async fn ask_ai(&self, request: &AskRequest) -> Result<AskResponse, ApiError> {
        let response = self
            .http
            .post(endpoint(&self.base_url, ASK_AI_PATH))
            .json(request)
            .send()
            .await?;
        let (status, text) = Self::read(response).await?;
        parse_json_reply(status, &text)
    }

    async fn clear_context(&self) -> Result<ClearContextResponse, ApiError> {
        let response = self
            .http
            .post(endpoint(&self.base_url, CLEAR_CONTEXT_PATH))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let (status, text) = Self::read(response).await?;
        parse_clear_context(status, &text)
    }

    async fn context_info(&self) -> Result<ContextInfo, ApiError> {
        let response = self
            .http
            .get(endpoint(&self.base_url, CONTEXT_INFO_PATH))
            .send()
            .await?;
        let (status, text) = Self::read(response).await?;
        parse_json_reply(status, &text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Error for a non-2xx status: `Status` when the body is a JSON error
/// object, `Decode` when it is not JSON.
fn status_error(status: u16, text: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => ApiError::Status { status, message: body.error.filter(|msg| !msg.trim().is_empty()) },
        Err(e) => e.into(),
    }
}

pub(crate) fn parse_login(status: u16, text: &str) -> Result<LoginResponse, ApiError> {
    match serde_json::from_str::<LoginResponse>(text) {
        Ok(resp) => Ok(resp),
        Err(_) if !is_success(status) => Err(status_error(status, text)),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn parse_json_reply<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, ApiError> {
    if !is_success(status) {
        return Err(status_error(status, text));
    }
    Ok(serde_json::from_str(text)?)
}

pub(crate) fn parse_clear_context(status: u16, text: &str) -> Result<ClearContextResponse, ApiError> {
    if is_success(status) && text.trim().is_empty() {
        return Ok(ClearContextResponse::default());
    }
    parse_json_reply(status, text)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
