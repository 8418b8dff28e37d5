//! Uniform JSON response envelope.
//!
//! Every endpoint answers with
//! `{success, message, data?, errors?, meta?}`; the HTTP status carries the
//! outcome class.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T, M> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
}

/// A successful response: status plus envelope.
#[derive(Debug)]
pub struct ApiResponse<T, M = ()> {
    pub status: StatusCode,
    pub body: Envelope<T, M>,
}

impl<T> ApiResponse<T> {
    /// 200 with `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    /// 201 with `data`.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            body: Envelope {
                success: true,
                message: message.into(),
                data: Some(data),
                errors: None,
                meta: None,
            },
        }
    }

    /// Attach list metadata.
    pub fn with_meta<M>(self, meta: M) -> ApiResponse<T, M> {
        let Envelope {
            success,
            message,
            data,
            errors,
            ..
        } = self.body;
        ApiResponse {
            status: self.status,
            body: Envelope {
                success,
                message,
                data,
                errors,
                meta: Some(meta),
            },
        }
    }
}

impl ApiResponse<()> {
    /// 200 carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope {
                success: true,
                message: message.into(),
                data: None,
                errors: None,
                meta: None,
            },
        }
    }
}

impl<T: Serialize, M: Serialize> IntoResponse for ApiResponse<T, M> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Render a failure envelope. `errors` is omitted when empty.
pub fn failure(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Response {
    let body: Envelope<(), ()> = Envelope {
        success: false,
        message: message.into(),
        data: None,
        errors: (!errors.is_empty()).then_some(errors),
        meta: None,
    };
    (status, Json(body)).into_response()
}
