//! Request extractors: bearer principal, wrapped JSON params, plain JSON.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use stagehand_auth_types::bearer::{BearerCredential, bearer_credential};
use stagehand_domain::policy::Principal;

use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::session::AuthenticateUseCase;

// ── Principal ────────────────────────────────────────────────────────────────

/// An authenticated caller. Rejects with 401 when the credential is absent
/// or does not resolve to a live user.
#[derive(Debug, Clone, Copy)]
pub struct Auth(pub Principal);

/// A caller that may be anonymous. A credential that is present but invalid
/// still rejects with 401.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuth(pub Option<Principal>);

impl MaybeAuth {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

fn authenticate(
    parts: &Parts,
    state: &AppState,
) -> impl Future<Output = Result<Option<Principal>, MarketplaceError>> + Send + use<> {
    let credential = bearer_credential(&parts.headers);
    let usecase = AuthenticateUseCase {
        repo: state.repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    async move {
        match credential {
            BearerCredential::Absent => Ok(None),
            BearerCredential::Invalid => Err(MarketplaceError::Unauthenticated),
            BearerCredential::Token(token) => usecase.execute(&token).await.map(Some),
        }
    }
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = MarketplaceError;

    // Values are read synchronously; the returned future owns everything it
    // touches so it does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let principal = authenticate(parts, state);
        async move {
            principal
                .await?
                .map(Self)
                .ok_or(MarketplaceError::Unauthenticated)
        }
    }
}

impl FromRequestParts<AppState> for MaybeAuth {
    type Rejection = MarketplaceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let principal = authenticate(parts, state);
        async move { principal.await.map(Self) }
    }
}

// ── Bodies ───────────────────────────────────────────────────────────────────

/// Body key a resource's params are wrapped in, e.g. `{"booking": {...}}`.
pub trait ParamKey {
    const KEY: &'static str;
}

/// Params read from under [`ParamKey::KEY`]. A missing key, a non-object
/// value or malformed JSON is a 400.
#[derive(Debug)]
pub struct Params<T>(pub T);

/// A top-level JSON body. Malformed JSON is a 400.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

async fn read_json(req: Request) -> Result<serde_json::Value, MarketplaceError> {
    let bytes = Bytes::from_request(req, &())
        .await
        .map_err(|e| MarketplaceError::BadInput(e.body_text()))?;
    serde_json::from_slice(&bytes)
        .map_err(|_| MarketplaceError::BadInput("Malformed JSON request body".to_owned()))
}

fn decode<T: DeserializeOwned>(
    value: serde_json::Value,
    what: &str,
) -> Result<T, MarketplaceError> {
    serde_json::from_value(value)
        .map_err(|e| MarketplaceError::BadInput(format!("Invalid {what} parameters: {e}")))
}

impl<S, T> FromRequest<S> for Params<T>
where
    S: Send + Sync,
    T: ParamKey + DeserializeOwned + Send,
{
    type Rejection = MarketplaceError;

    fn from_request(
        req: Request,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let mut body = read_json(req).await?;
            let params = body
                .get_mut(T::KEY)
                .map(serde_json::Value::take)
                .filter(serde_json::Value::is_object)
                .ok_or_else(|| {
                    MarketplaceError::BadInput(format!(
                        "param is missing or the value is empty: {}",
                        T::KEY
                    ))
                })?;
            decode(params, T::KEY).map(Self)
        }
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = MarketplaceError;

    fn from_request(
        req: Request,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let body = read_json(req).await?;
            decode(body, "request").map(Self)
        }
    }
}

/// Path id. An unparseable id names no row, so it is looked up as the nil
/// uuid and ends in the usual 401/403/404 sequence.
pub fn resource_id(raw: &str) -> Uuid {
    raw.parse().unwrap_or(Uuid::nil())
}
