//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request id, tracing, timeout)
//!     → dispatch (request head → Context)
//!     → App pipeline (mounts, responders, ...)
//!     → response.rs (Context or HandlerError → Response)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - The request body is not read; pipelines work on the request head
//! - Every method and path goes to the app; 404 means nothing answered

pub mod respond;
pub mod response;
pub mod server;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};

use crate::app::App;
use crate::pipeline::Context;

pub use respond::Respond;
pub use server::HttpServer;

/// Router that hands every request to `app`.
pub fn app_router(app: App) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(Arc::new(app))
}

async fn dispatch(State(app): State<Arc<App>>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let mut ctx = Context::from_parts(&parts);

    tracing::debug!(
        method = %parts.method,
        path = %ctx.path(),
        app = app.name().unwrap_or("unnamed"),
        "Dispatching request"
    );

    match app.dispatch(&mut ctx).await {
        Ok(()) => ctx.into_response(),
        Err(err) => err.into_response(),
    }
}
