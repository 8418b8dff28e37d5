//! Test utilities for Stagehand services.
//!
//! Provides principal fixtures, bearer-header builders and response body
//! helpers. Import from tests only, never from production code.

pub mod auth;
pub mod body;
pub mod principal;
