//! Domain types shared across all Stagehand crates.
//!
//! This crate contains only pure types and rules with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod booking;
pub mod organization;
pub mod pagination;
pub mod policy;
pub mod user;
