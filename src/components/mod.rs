//! Leptos view components for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! `chat_panel` owns the per-instance session signal and composes the
//! launcher, turn list, and `composer`; `turn_bubble` renders one turn.

pub mod chat_panel;
pub mod composer;
pub mod turn_bubble;
