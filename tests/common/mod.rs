//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use path_mount::pipeline::{BoxFuture, HandlerResult};
use path_mount::{Context, Middleware, Next};
use tower::ServiceExt;

/// Send a GET for `path` through `router`, returning status and body.
pub async fn get(router: &Router, path: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Shared execution log.
pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Logs `label` on the way in and `label-tail` on the way out.
pub struct Record {
    log: Log,
    label: &'static str,
}

impl Record {
    pub fn new(log: &Log, label: &'static str) -> Self {
        Self {
            log: Arc::clone(log),
            label,
        }
    }
}

impl Middleware for Record {
    fn call<'a>(&'a self, ctx: &'a mut Context, next: Next<'a>) -> BoxFuture<'a, HandlerResult> {
        Box::pin(async move {
            self.log.lock().unwrap().push(self.label.to_string());
            next.run(ctx).await?;
            self.log.lock().unwrap().push(format!("{}-tail", self.label));
            Ok(())
        })
    }

    fn name(&self) -> &str {
        self.label
    }
}

/// Logs the visible path before and after `next`.
pub struct LogPath {
    log: Log,
}

impl LogPath {
    pub fn new(log: &Log) -> Self {
        Self {
            log: Arc::clone(log),
        }
    }
}

impl Middleware for LogPath {
    fn call<'a>(&'a self, ctx: &'a mut Context, next: Next<'a>) -> BoxFuture<'a, HandlerResult> {
        Box::pin(async move {
            self.log.lock().unwrap().push(ctx.path().to_string());
            next.run(ctx).await?;
            self.log.lock().unwrap().push(ctx.path().to_string());
            Ok(())
        })
    }
}
