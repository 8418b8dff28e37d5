//! Bearer-credential types shared across Stagehand services.
//!
//! Provides JWT issuance and validation plus `Authorization: Bearer` parsing.

pub mod bearer;
pub mod token;
