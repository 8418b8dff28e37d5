//! Service plumbing shared by Stagehand HTTP services: response envelope,
//! validation-message collector, tracing, request ids, health and config.

pub mod config;
pub mod envelope;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
