//! `Authorization: Bearer` header parsing.

use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::HeaderMap;

/// Outcome of reading the credential header.
///
/// An absent header and an unparseable one are kept apart: the first means
/// an anonymous caller, the second must fail closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BearerCredential {
    Absent,
    Invalid,
    Token(String),
}

/// Read the bearer token from `headers`.
pub fn bearer_credential(headers: &HeaderMap) -> BearerCredential {
    if !headers.contains_key(http::header::AUTHORIZATION) {
        return BearerCredential::Absent;
    }
    match headers.typed_get::<Authorization<Bearer>>() {
        Some(Authorization(bearer)) if !bearer.token().is_empty() => {
            BearerCredential::Token(bearer.token().to_owned())
        }
        _ => BearerCredential::Invalid,
    }
}
