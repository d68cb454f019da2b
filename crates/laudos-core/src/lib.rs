//! laudos-core
//!
//! Pure domain types for radiology report drafting: completion requests,
//! structured blocks parsed out of model output, and the report payload
//! returned to the editor. No network dependency; this is the shared
//! vocabulary of the Laudos system.

pub mod error;
pub mod models;
