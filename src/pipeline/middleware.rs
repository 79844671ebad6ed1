//! The middleware contract.

use std::fmt;
use std::sync::Arc;

pub use futures_util::future::BoxFuture;

use crate::error::HandlerError;
use crate::pipeline::{Context, Next};

/// Outcome of a middleware invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// Shared, type-erased middleware.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// A pipeline stage.
///
/// A stage receives the request context and the continuation for
/// everything after it. Work done before `next.run(ctx).await` happens on
/// the way in, work after it on the way out. Returning without running
/// `next` ends the pipeline at this stage.
pub trait Middleware: Send + Sync {
    fn call<'a>(&'a self, ctx: &'a mut Context, next: Next<'a>) -> BoxFuture<'a, HandlerResult>;

    /// Label used in logs.
    fn name(&self) -> &str {
        "unnamed"
    }
}

impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    fn call<'a>(&'a self, ctx: &'a mut Context, next: Next<'a>) -> BoxFuture<'a, HandlerResult> {
        (**self).call(ctx, next)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Middleware backed by a closure. See [`from_fn`].
pub struct FnMiddleware<F> {
    f: F,
    name: Option<String>,
}

/// Turn a closure into a middleware.
///
/// ```
/// use path_mount::pipeline::from_fn;
///
/// let hello = from_fn(|ctx, next| {
///     Box::pin(async move {
///         next.run(ctx).await?;
///         ctx.set_body("Hello");
///         Ok(())
///     })
/// });
/// # let _ = hello;
/// ```
pub fn from_fn<F>(f: F) -> FnMiddleware<F>
where
    F: for<'a> Fn(&'a mut Context, Next<'a>) -> BoxFuture<'a, HandlerResult> + Send + Sync,
{
    FnMiddleware { f, name: None }
}

impl<F> FnMiddleware<F> {
    /// Attach a name for diagnostics.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(&'a mut Context, Next<'a>) -> BoxFuture<'a, HandlerResult> + Send + Sync,
{
    fn call<'a>(&'a self, ctx: &'a mut Context, next: Next<'a>) -> BoxFuture<'a, HandlerResult> {
        (self.f)(ctx, next)
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

impl<F> fmt::Debug for FnMiddleware<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMiddleware")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_fn_runs_closure() {
        let mw = from_fn(|ctx, next| {
            Box::pin(async move {
                ctx.set_body("hit");
                next.run(ctx).await
            })
        });

        let mut ctx = Context::get("/").unwrap();
        mw.call(&mut ctx, Next::end()).await.unwrap();
        assert_eq!(ctx.body().unwrap().as_ref(), b"hit");
    }

    #[test]
    fn test_names() {
        let anonymous = from_fn(|ctx, next| next.run(ctx));
        assert_eq!(anonymous.name(), "unnamed");

        let named: BoxedMiddleware = Arc::new(from_fn(|ctx, next| next.run(ctx)).named("hello"));
        assert_eq!(named.name(), "hello");
    }
}
