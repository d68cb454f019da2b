//! laudos-completion
//!
//! Chat-completion invocation against an OpenAI-compatible endpoint.

pub mod client;
pub mod error;
pub mod retry;
pub mod service;
