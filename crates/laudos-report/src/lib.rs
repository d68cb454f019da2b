//! laudos-report
//!
//! Report generation pipeline: sub-agent orchestration, structured block
//! parsing, sanitization and payload assembly, plus the editor assistants.

pub mod assemble;
pub mod assist;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod sanitize;
pub mod stage;
