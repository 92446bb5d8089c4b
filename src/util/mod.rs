//! Utility helpers shared across widget modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from component logic
//! to improve reuse and testability.

pub mod clipboard;
pub mod markdown;
