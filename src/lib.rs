//! # gemini-widget
//!
//! Leptos + WASM embeddable chat widget backed by the Gemini
//! `generateContent` API. A host page declares `<gemini-chat-widget>` and the
//! crate mounts an isolated chat UI inside the element's shadow root.
//!
//! The behavioral core (configuration, completion client, conversation state,
//! mount lifecycle) compiles natively so it can be tested without a browser.
//! DOM glue and the `fetch` transport live behind the `csr` feature.

pub mod components;
pub mod config;
pub mod mount;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "csr")]
use wasm_bindgen::prelude::wasm_bindgen;

/// WASM entry point: install logging and register the custom element.
#[cfg(feature = "csr")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already installed: {e}").into());
    }
    match mount::element::define() {
        Ok(true) => log::info!("registered <{}>", config::ELEMENT_TAG),
        Ok(false) => log::debug!("<{}> already registered", config::ELEMENT_TAG),
        Err(e) => log::warn!("custom element registration failed: {e}"),
    }
}

/// Embed snippet a host page pastes before `</body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen(js_name = embedSnippet)]
pub fn embed_snippet_js() -> String {
    util::clipboard::embed_snippet(util::clipboard::PLACEHOLDER_API_KEY, config::DEFAULT_MODEL)
}
