//! Widget configuration read from the host element's attributes.
//!
//! DESIGN
//! ======
//! Configuration is captured once per attach and then handed down as an
//! immutable value. Absent and empty attributes are treated the same way so a
//! host template that renders `model=""` still gets the default model.

use std::fmt;

/// Custom element tag a host page declares.
pub const ELEMENT_TAG: &str = "gemini-chat-widget";
/// Attribute carrying the caller-supplied API key.
pub const ATTR_API_KEY: &str = "api-key";
/// Attribute selecting the backend model variant.
pub const ATTR_MODEL: &str = "model";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Immutable per-instance widget configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    api_key: String,
    model: String,
}

impl WidgetConfig {
    /// Build a config from raw attribute values, falling back to defaults.
    ///
    /// The API key is opaque and kept verbatim; only a blank key is treated as
    /// absent. An empty API key is accepted: the widget still renders, and the
    /// first request fails with a credential error.
    #[must_use]
    pub fn from_attributes(api_key: Option<String>, model: Option<String>) -> Self {
        let api_key = api_key.filter(|v| !v.trim().is_empty()).unwrap_or_default();
        let model = non_empty(model).unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        Self { api_key, model }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether a credential was supplied at all.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::from_attributes(None, None)
    }
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() { "<empty>" } else { "<redacted>" };
        f.debug_struct("WidgetConfig")
            .field("api_key", &key)
            .field("model", &self.model)
            .finish()
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
