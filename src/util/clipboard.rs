//! Embed snippet text and clipboard copy.
//!
//! TRADE-OFFS
//! ==========
//! Copying is best-effort browser-only behavior; native builds report that no
//! copy was started so callers can skip "Copied" feedback.

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

use crate::config::{ATTR_API_KEY, ATTR_MODEL, ELEMENT_TAG};

pub const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY";
/// Published location of the wasm-bindgen JS loader.
pub const BUNDLE_URL: &str = "https://gemini-widget.vercel.app/pkg/gemini_widget.js";

/// Markup a host page pastes just before `</body>`.
#[must_use]
pub fn embed_snippet(api_key: &str, model: &str) -> String {
    format!(
        "<script type=\"module\">\n  import init from \"{BUNDLE_URL}\";\n  init();\n</script>\n\
         <{ELEMENT_TAG} {ATTR_API_KEY}=\"{}\" {ATTR_MODEL}=\"{}\"></{ELEMENT_TAG}>",
        escape_attr(api_key),
        escape_attr(model),
    )
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// Start copying `text` to the system clipboard.
///
/// Returns `true` when the clipboard write was issued.
pub fn copy_text(text: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        let Some(clipboard) = web_sys::window().map(|w| w.navigator().clipboard()) else {
            return false;
        };
        let promise = clipboard.write_text(text);
        leptos::task::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                log::warn!("clipboard write failed: {e:?}");
            }
        });
        true
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("clipboard unavailable; {} bytes not copied", text.len());
        false
    }
}
