//! Gemini `generateContent` client.
//!
//! DESIGN
//! ======
//! One user turn maps to exactly one POST. The prompt is sent alone, without
//! earlier turns, so every call is stateless from the backend's point of view
//! even though the panel keeps history. There is no retry, backoff, or
//! timeout: the user resends by submitting again.
//!
//! The HTTP hop sits behind [`HttpTransport`] so status classification and
//! answer extraction run natively in tests; the browser build plugs in
//! [`FetchTransport`] backed by `gloo-net`.

#[cfg(test)]
#[path = "gemini_test.rs"]
mod gemini_test;

use async_trait::async_trait;

use super::error::CompletionError;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::DEFAULT_API_BASE_URL;

// =============================================================================
// SEAMS
// =============================================================================

/// Raw HTTP outcome handed back by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Minimal POST-JSON transport.
///
/// `Err` means the request never produced a status (network failure, CORS,
/// aborted fetch).
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, String>;
}

/// One-shot text completion used by the chat session.
#[async_trait(?Send)]
pub trait Completion {
    /// Send `prompt` to `model` and return the answer text.
    ///
    /// # Errors
    ///
    /// Returns a classified [`CompletionError`] for blank prompts, rejected
    /// credentials, unknown models, malformed bodies, and transport failures.
    async fn complete(&self, credential: &str, model: &str, prompt: &str) -> Result<String, CompletionError>;
}

// =============================================================================
// CLIENT
// =============================================================================

/// Completion client for the Gemini REST API.
pub struct GeminiClient<T> {
    transport: T,
    base_url: String,
}

impl<T: HttpTransport> GeminiClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_base_url(transport, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(transport: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { transport, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "csr")]
impl GeminiClient<FetchTransport> {
    /// Client using the browser `fetch` API.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(FetchTransport)
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> Completion for GeminiClient<T> {
    async fn complete(&self, credential: &str, model: &str, prompt: &str) -> Result<String, CompletionError> {
        if prompt.trim().is_empty() {
            return Err(CompletionError::EmptyInput);
        }

        let url = endpoint_url(&self.base_url, model, credential);
        let body = serde_json::to_string(&GenerateContentRequest::single_prompt(prompt))
            .map_err(|e| CompletionError::GenericFailure(e.to_string()))?;

        log::debug!("generateContent: model={model} prompt_len={}", prompt.len());
        let reply = self
            .transport
            .post_json(&url, body)
            .await
            .map_err(CompletionError::GenericFailure)?;
        classify_reply(reply, model)
    }
}

/// Build the `generateContent` URL for `model` with the credential as `key`.
#[must_use]
pub fn endpoint_url(base_url: &str, model: &str, credential: &str) -> String {
    format!("{base_url}/models/{model}:generateContent?key={credential}")
}

/// Turn a raw reply into answer text or a classified error.
///
/// # Errors
///
/// Non-2xx statuses map through [`CompletionError::from_status`]; a 2xx body
/// without the answer path is [`CompletionError::MalformedResponse`].
pub fn classify_reply(reply: HttpReply, model: &str) -> Result<String, CompletionError> {
    if !(200..300).contains(&reply.status) {
        return Err(CompletionError::from_status(reply.status, model));
    }
    parse_answer(&reply.body)
}

/// Extract the first candidate's first text part from a success body.
///
/// # Errors
///
/// Returns [`CompletionError::MalformedResponse`] when the body is not JSON or
/// the answer path does not exist.
pub fn parse_answer(body: &str) -> Result<String, CompletionError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
    parsed
        .first_text()
        .map(str::to_owned)
        .ok_or_else(|| CompletionError::MalformedResponse("missing candidates[0].content.parts[0].text".to_owned()))
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

/// `fetch`-backed transport for the WASM build.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[cfg(feature = "csr")]
#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, String> {
        let resp = gloo_net::http::Request::post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        reply_from_parts(status, resp.text().await.map_err(|e| e.to_string()))
    }
}

/// Combine a status with the outcome of reading the body.
///
/// A failed read only matters on success: error statuses are classified from
/// the status alone, so they keep an empty body.
///
/// # Errors
///
/// Returns the read error when the status is 2xx.
pub fn reply_from_parts(status: u16, body: Result<String, String>) -> Result<HttpReply, String> {
    match body {
        Ok(body) => Ok(HttpReply { status, body }),
        Err(e) if (200..300).contains(&status) => Err(e),
        Err(e) => {
            log::debug!("ignoring unreadable body on status {status}: {e}");
            Ok(HttpReply { status, body: String::new() })
        }
    }
}
