//! Applications: named, ordered middleware lists.

use std::fmt;
use std::sync::Arc;

use axum::Router;

use crate::pipeline::{BoxedMiddleware, Context, HandlerResult, Middleware, Next};

/// An ordered list of middleware, optionally named.
///
/// An `App` is both the thing served over HTTP and the thing mounted
/// inside another app.
#[derive(Clone, Default)]
pub struct App {
    name: Option<String>,
    middleware: Vec<BoxedMiddleware>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            middleware: Vec::new(),
        }
    }

    /// Append a middleware.
    pub fn with(self, middleware: impl Middleware + 'static) -> Self {
        self.with_boxed(Arc::new(middleware))
    }

    /// Append an already shared middleware, e.g. the result of `mount`.
    pub fn with_boxed(mut self, middleware: BoxedMiddleware) -> Self {
        self.push(middleware);
        self
    }

    pub fn push(&mut self, middleware: BoxedMiddleware) {
        self.middleware.push(middleware);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn middleware(&self) -> &[BoxedMiddleware] {
        &self.middleware
    }

    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Run the whole pipeline for one request.
    pub async fn dispatch(&self, ctx: &mut Context) -> HandlerResult {
        Next::stack(&self.middleware, Next::end()).run(ctx).await
    }

    /// Serve this app as an axum router handling every method and path.
    pub fn into_router(self) -> Router {
        crate::http::app_router(self)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.middleware.iter().map(|m| m.name()).collect();
        f.debug_struct("App")
            .field("name", &self.name)
            .field("middleware", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::from_fn;

    #[tokio::test]
    async fn test_dispatch_runs_all_stages() {
        let app = App::new()
            .with(from_fn(|ctx, next| {
                Box::pin(async move {
                    next.run(ctx).await?;
                    ctx.set_body(format!("outer saw {}", ctx.path()));
                    Ok(())
                })
            }))
            .with(from_fn(|ctx, next| {
                Box::pin(async move {
                    ctx.set_path("/rewritten");
                    next.run(ctx).await
                })
            }));

        let mut ctx = Context::get("/original").unwrap();
        app.dispatch(&mut ctx).await.unwrap();

        assert_eq!(ctx.body().unwrap().as_ref(), b"outer saw /rewritten");
    }

    #[test]
    fn test_builder() {
        let mut app = App::named("api").with(from_fn(|ctx, next| next.run(ctx)).named("first"));
        app.push(Arc::new(from_fn(|ctx, next| next.run(ctx))));

        assert_eq!(app.name(), Some("api"));
        assert_eq!(app.len(), 2);
        assert!(!app.is_empty());
        assert_eq!(format!("{app:?}"), r#"App { name: Some("api"), middleware: ["first", "unnamed"] }"#);
        assert!(App::new().is_empty());
    }
}
