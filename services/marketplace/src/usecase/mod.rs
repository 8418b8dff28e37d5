pub mod artist_profile;
pub mod availability;
pub mod booking;
pub mod crud;
pub mod dashboard;
pub mod organization;
pub mod payment;
pub mod review;
pub mod service;
pub mod service_category;
pub mod session;
pub mod user;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

use stagehand_core::error::ValidationErrors;
use stagehand_domain::policy::{Action, Ownership, Principal, ResourceKind, can};

use crate::error::MarketplaceError;

/// Run the authorization matrix. Anonymous callers get 401, everyone else 403.
pub fn authorize(
    principal: Option<&Principal>,
    action: Action,
    kind: ResourceKind,
    instance: Option<&Ownership>,
) -> Result<(), MarketplaceError> {
    if can(principal, action, kind, instance) {
        return Ok(());
    }
    Err(match principal {
        None => MarketplaceError::Unauthenticated,
        Some(_) => MarketplaceError::Forbidden,
    })
}

/// Trimmed text, or `None` when blank.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse an enumerated field, recording a validation message on failure.
pub(crate) fn parse_enum<E: std::str::FromStr>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
) -> Option<E> {
    let value = value?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(field, "is not included in the list");
            None
        }
    }
}

/// `YYYY-MM-DD`.
pub(crate) fn parse_date(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok();
    errors.check(parsed.is_some(), field, "is invalid");
    parsed
}

/// `HH:MM` or `HH:MM:SS`.
pub(crate) fn parse_time(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
) -> Option<NaiveTime> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    let parsed = NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok();
    errors.check(parsed.is_some(), field, "is invalid");
    parsed
}

/// Keeps an explicit `null` apart from an absent key: absent is `None`,
/// `null` is `Some(None)`. Use with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
