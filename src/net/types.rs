//! Wire DTOs for the `generateContent` endpoint.
//!
//! DESIGN
//! ======
//! Only the fields the widget reads are modeled. Unknown response fields
//! (safety ratings, usage metadata) are ignored by serde, and every response
//! field defaults so a partial body still deserializes and the missing answer
//! path is reported as a malformed response instead of a parse failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Request body: a single content entry wrapping the prompt text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// Build a stateless single-turn request for `prompt`.
    #[must_use]
    pub fn single_prompt(prompt: &'a str) -> Self {
        Self { contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }] }
    }
}

/// Success response body.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// First candidate's first text part, if that path exists.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}
