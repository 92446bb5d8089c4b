//! Per-panel client-side state.
//!
//! DESIGN
//! ======
//! `conversation` is the append-only turn log; `chat` wraps it with the input
//! buffer, the `generating` guard, and panel visibility, and owns the turn
//! submission protocol. Each mounted widget owns its own instance.

pub mod chat;
pub mod conversation;
