use std::cell::RefCell;

use super::*;
use crate::net::error::{CREDENTIAL_INVALID_MESSAGE, MODEL_INVALID_MESSAGE};

// =========================================================================
// FakeTransport
// =========================================================================

struct FakeTransport {
    reply: Result<HttpReply, String>,
    calls: RefCell<Vec<(String, String)>>,
}

impl FakeTransport {
    fn replying(status: u16, body: serde_json::Value) -> Self {
        Self { reply: Ok(HttpReply { status, body: body.to_string() }), calls: RefCell::new(Vec::new()) }
    }

    fn raw(status: u16, body: &str) -> Self {
        Self { reply: Ok(HttpReply { status, body: body.to_owned() }), calls: RefCell::new(Vec::new()) }
    }

    fn failing(message: &str) -> Self {
        Self { reply: Err(message.to_owned()), calls: RefCell::new(Vec::new()) }
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, String> {
        self.calls.borrow_mut().push((url.to_owned(), body));
        self.reply.clone()
    }
}

fn hello_body() -> serde_json::Value {
    serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": "Hello" }] } }] })
}

// =========================================================================
// endpoint_url / base url
// =========================================================================

#[test]
fn endpoint_url_templates_model_and_key() {
    assert_eq!(
        endpoint_url(DEFAULT_API_BASE_URL, "gemini-1.5-flash", "abc"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=abc"
    );
}

#[test]
fn with_base_url_strips_trailing_slash() {
    let client = GeminiClient::with_base_url(FakeTransport::failing("unused"), "http://localhost:9000/v1/");
    assert_eq!(client.base_url(), "http://localhost:9000/v1");
}

// =========================================================================
// complete
// =========================================================================

#[tokio::test]
async fn success_returns_first_text() {
    let client = GeminiClient::new(FakeTransport::replying(200, hello_body()));
    let answer = client.complete("key", "gemini-1.5-flash", "Hi").await;
    assert_eq!(answer, Ok("Hello".to_owned()));
}

#[tokio::test]
async fn sends_single_prompt_to_configured_model() {
    let client = GeminiClient::new(FakeTransport::replying(200, hello_body()));
    client.complete("k-1", "gemini-1.5-pro", "What is Rust?").await.unwrap();

    let calls = client.transport.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (url, body) = &calls[0];
    assert!(url.ends_with("/models/gemini-1.5-pro:generateContent?key=k-1"), "{url}");
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body, serde_json::json!({ "contents": [{ "parts": [{ "text": "What is Rust?" }] }] }));
}

#[tokio::test]
async fn status_400_maps_to_credential_invalid() {
    let client = GeminiClient::new(FakeTransport::replying(400, serde_json::json!({ "error": { "code": 400 } })));
    let err = client.complete("bad", "gemini-1.5-flash", "anything").await.unwrap_err();
    assert_eq!(err, CompletionError::CredentialInvalid);
    assert_eq!(err.user_message(), CREDENTIAL_INVALID_MESSAGE);
}

#[tokio::test]
async fn status_404_maps_to_model_invalid() {
    let client = GeminiClient::new(FakeTransport::replying(404, serde_json::json!({})));
    let err = client.complete("key", "gemini-unknown", "anything").await.unwrap_err();
    assert_eq!(err, CompletionError::ModelInvalid("gemini-unknown".to_owned()));
    assert_eq!(err.user_message(), MODEL_INVALID_MESSAGE);
}

#[tokio::test]
async fn server_error_is_generic() {
    let client = GeminiClient::new(FakeTransport::raw(500, "internal"));
    let err = client.complete("key", "m", "hi").await.unwrap_err();
    assert!(matches!(err, CompletionError::GenericFailure(ref detail) if detail.contains("500")));
}

#[tokio::test]
async fn network_failure_is_generic() {
    let client = GeminiClient::new(FakeTransport::failing("TypeError: Failed to fetch"));
    let err = client.complete("key", "m", "hi").await.unwrap_err();
    assert_eq!(err, CompletionError::GenericFailure("TypeError: Failed to fetch".to_owned()));
}

#[tokio::test]
async fn success_without_answer_path_is_malformed() {
    let client = GeminiClient::new(FakeTransport::replying(200, serde_json::json!({ "candidates": [] })));
    let err = client.complete("key", "m", "hi").await.unwrap_err();
    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}

#[tokio::test]
async fn success_with_non_json_body_is_malformed() {
    let client = GeminiClient::new(FakeTransport::raw(200, "<html>proxy</html>"));
    let err = client.complete("key", "m", "hi").await.unwrap_err();
    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}

#[tokio::test]
async fn blank_prompt_never_reaches_transport() {
    let client = GeminiClient::new(FakeTransport::replying(200, hello_body()));
    let err = client.complete("key", "m", "  \n\t").await.unwrap_err();
    assert_eq!(err, CompletionError::EmptyInput);
    assert!(client.transport.calls.borrow().is_empty());
}

// =========================================================================
// classify_reply
// =========================================================================

#[test]
fn classify_reply_accepts_any_2xx() {
    let reply = HttpReply { status: 203, body: hello_body().to_string() };
    assert_eq!(classify_reply(reply, "m"), Ok("Hello".to_owned()));
}

#[test]
fn classify_reply_ignores_body_on_error_status() {
    let reply = HttpReply { status: 400, body: hello_body().to_string() };
    assert_eq!(classify_reply(reply, "m"), Err(CompletionError::CredentialInvalid));
}

// =========================================================================
// reply_from_parts
// =========================================================================

#[test]
fn unreadable_body_on_error_status_still_classifies() {
    let reply = reply_from_parts(400, Err("body stream aborted".to_owned())).unwrap();
    assert_eq!(reply, HttpReply { status: 400, body: String::new() });
    assert_eq!(classify_reply(reply, "m"), Err(CompletionError::CredentialInvalid));

    let reply = reply_from_parts(404, Err("body stream aborted".to_owned())).unwrap();
    assert_eq!(classify_reply(reply, "gemini-x"), Err(CompletionError::ModelInvalid("gemini-x".to_owned())));
}

#[test]
fn unreadable_body_on_success_is_a_transport_error() {
    assert_eq!(reply_from_parts(200, Err("decode failed".to_owned())), Err("decode failed".to_owned()));
}

#[test]
fn readable_body_passes_through() {
    let reply = reply_from_parts(200, Ok("{}".to_owned())).unwrap();
    assert_eq!(reply.body, "{}");
}
