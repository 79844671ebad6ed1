//! Static responder used by configured mounts.

use axum::http::StatusCode;

use crate::pipeline::{BoxFuture, Context, HandlerResult, Middleware, Next};

/// Fills in a fixed response on the way out, unless a later stage
/// already answered.
#[derive(Debug, Clone, Default)]
pub struct Respond {
    status: Option<StatusCode>,
    body: Option<String>,
    echo: bool,
}

impl Respond {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Answer with the visible path and mount root instead of a fixed body.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn answered(ctx: &Context) -> bool {
        ctx.status().is_some() || ctx.body().is_some()
    }
}

impl Middleware for Respond {
    fn call<'a>(&'a self, ctx: &'a mut Context, next: Next<'a>) -> BoxFuture<'a, HandlerResult> {
        Box::pin(async move {
            next.run(ctx).await?;

            if Self::answered(ctx) {
                return Ok(());
            }

            if self.echo {
                let body = format!(
                    "path={} mount_path={}\n",
                    ctx.path(),
                    ctx.mount_path().unwrap_or("/")
                );
                ctx.set_body(body);
            } else if let Some(body) = &self.body {
                ctx.set_body(body.clone());
            }

            if let Some(status) = self.status {
                ctx.set_status(status);
            }
            Ok(())
        })
    }

    fn name(&self) -> &str {
        "respond"
    }
}
