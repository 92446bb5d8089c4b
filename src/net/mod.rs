//! Networking modules for the Gemini completion call.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gemini` issues one request per user turn, `types` defines the wire
//! schema, and `error` classifies failures into the user-facing taxonomy.

pub mod error;
pub mod gemini;
pub mod types;
