//! Response rendering.
//!
//! # Responsibilities
//! - Turn the response fields of a finished `Context` into a `Response`
//! - Map `HandlerError` to an HTTP status
//!
//! # Design Decisions
//! - Nothing set at all means no stage answered: 404
//! - A body without a status is a 200
//! - Unexpected errors are logged here and hidden from the client

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::HandlerError;
use crate::pipeline::Context;

impl IntoResponse for Context {
    fn into_response(self) -> Response {
        let (status, body, headers) = self.into_response_parts();

        if status.is_none() && body.is_none() {
            return (StatusCode::NOT_FOUND, "Not Found").into_response();
        }

        let mut response = match body {
            Some(bytes) => {
                let mut response = Response::new(Body::from(bytes));
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                );
                response
            }
            None => Response::new(Body::empty()),
        };
        *response.status_mut() = status.unwrap_or(StatusCode::OK);
        response.headers_mut().extend(headers);
        response
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::Status { status, message } => (status, message).into_response(),
            HandlerError::Other(err) => {
                tracing::error!(error = %err, "Unhandled middleware error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
