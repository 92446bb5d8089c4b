//! Embeddable mount: the `<gemini-chat-widget>` custom element.
//!
//! ARCHITECTURE
//! ============
//! `lifecycle` holds the attach/detach state machine over a [`RenderHost`]
//! seam and is platform-neutral. `element` (browser build only) implements
//! that seam with a shadow root and registers the custom element.
//!
//! [`RenderHost`]: lifecycle::RenderHost

#[cfg(feature = "csr")]
pub mod element;
pub mod lifecycle;

/// Style rules injected into every isolated root.
pub const WIDGET_CSS: &str = include_str!("../../style/widget.css");

/// Failures while building or tearing down a widget's rendering root.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    /// The browser refused to create the isolated root.
    #[error("isolated root unavailable: {0}")]
    IsolatedRoot(String),

    /// A DOM node could not be created or inserted.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}
