//! Smith daemon library - exposes modules for testing.

pub mod actions;
pub mod config;
pub mod intent;
pub mod net;
pub mod ollama;
pub mod routes;
pub mod server;
