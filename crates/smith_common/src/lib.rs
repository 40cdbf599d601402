//! Shared types for the Smith intent relay.
//!
//! Request/response shapes, the closed action and emotion enumerations,
//! and the deterministic fallback parser. Everything here is pure and
//! request-scoped so both the daemon and its tests can use it directly.

pub mod fallback;
pub mod intent;
pub mod status;

pub use intent::{Action, Command, Emotion, IntentResult, IntentSource, ResolvedIntent};
pub use status::{HealthResponse, OllamaHealth, ServiceInfo};
