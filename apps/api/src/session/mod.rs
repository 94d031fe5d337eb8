//! Live Session Conductor — the server side of a spoken interview session.
//!
//! The voice-agent vendor SDK lives in the browser; this module owns the
//! session *state*: an explicit finite-state machine driven by vendor events
//! relayed over a WebSocket, an ordered transcript log with a streaming-aware
//! formatter, and the system instruction handed to the agent at start.

pub mod conductor;
pub mod events;
pub mod handlers;
pub mod instruction;
pub mod transcript;
