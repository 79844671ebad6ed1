//! Building an application from configured mounts.

use axum::http::StatusCode;

use crate::app::App;
use crate::config::schema::{MountConfig, ServerConfig};
use crate::error::MountError;
use crate::http::Respond;
use crate::pipeline::BoxedMiddleware;
use crate::routing::mount;

/// Build the top-level app: every configured mount, in order.
pub fn build_app(config: &ServerConfig) -> Result<App, MountError> {
    config
        .mounts
        .iter()
        .try_fold(App::named("root"), |app, m| {
            Ok::<_, MountError>(app.with_boxed(build_mount(m)?))
        })
}

/// Build one mount: its responder, then its nested mounts.
///
/// The responder runs first so that its fill-in happens last, after any
/// nested mount had the chance to answer.
fn build_mount(config: &MountConfig) -> Result<BoxedMiddleware, MountError> {
    let name = config.name.clone().unwrap_or_else(|| config.prefix.clone());

    let mut respond = Respond::new().echo(config.echo);
    if let Some(body) = &config.body {
        respond = respond.body(body.clone());
    }
    // validation already rejected out-of-range codes
    if let Some(status) = config.status.and_then(|s| StatusCode::from_u16(s).ok()) {
        respond = respond.status(status);
    }

    let sub = config
        .mounts
        .iter()
        .try_fold(App::named(name).with(respond), |app, m| {
            Ok::<_, MountError>(app.with_boxed(build_mount(m)?))
        })?;

    mount(&config.prefix, sub)
}
