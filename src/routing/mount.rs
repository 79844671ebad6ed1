//! Mounting a sub-application under a path prefix.
//!
//! # Responsibilities
//! - Validate the prefix and resolve the target once, at setup
//! - Activate the downstream only for paths under the prefix
//! - Rewrite `path` / `mount_path` while the downstream runs
//! - Expose the outer location again while the outer pipeline runs
//! - Restore the outer location on every exit path
//!
//! # Design Decisions
//! - Mounting at `/` is the identity: the downstream is returned as is
//! - Errors pass through untouched; restoration is tied to `Drop`
//! - The mount holds no per-request state

use std::sync::Arc;

use tracing::debug;

use crate::app::App;
use crate::error::MountError;
use crate::observability::metrics;
use crate::pipeline::context::{Location, LocationGuard};
use crate::pipeline::{
    BoxFuture, BoxedMiddleware, Compose, Context, FnMiddleware, HandlerResult, Middleware, Next,
};
use crate::routing::matcher::PrefixMatcher;

/// Something that can be mounted.
#[derive(Clone)]
pub enum Target {
    /// A single middleware, used as the downstream directly.
    Handler(BoxedMiddleware),
    /// An application whose middleware list is composed into the downstream.
    App(App),
}

impl Target {
    /// Wrap any middleware.
    pub fn handler(middleware: impl Middleware + 'static) -> Self {
        Target::Handler(Arc::new(middleware))
    }

    fn name(&self) -> String {
        match self {
            Target::Handler(handler) => handler.name().to_string(),
            Target::App(app) => app.name().unwrap_or("unnamed").to_string(),
        }
    }

    fn into_downstream(self) -> BoxedMiddleware {
        match self {
            Target::Handler(handler) => handler,
            Target::App(app) => {
                let name = app.name().unwrap_or("unnamed").to_string();
                Arc::new(Compose::new(app.middleware().to_vec()).named(name))
            }
        }
    }
}

impl From<App> for Target {
    fn from(app: App) -> Self {
        Target::App(app)
    }
}

impl From<BoxedMiddleware> for Target {
    fn from(handler: BoxedMiddleware) -> Self {
        Target::Handler(handler)
    }
}

impl<F> From<FnMiddleware<F>> for Target
where
    FnMiddleware<F>: Middleware + 'static,
{
    fn from(handler: FnMiddleware<F>) -> Self {
        Target::handler(handler)
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Handler(handler) => f.debug_tuple("Handler").field(&handler.name()).finish(),
            Target::App(app) => f.debug_tuple("App").field(app).finish(),
        }
    }
}

/// A downstream mounted under a prefix.
pub struct Mount {
    matcher: PrefixMatcher,
    downstream: BoxedMiddleware,
    name: String,
}

/// Mount `target` under `prefix`.
///
/// Fails if `prefix` does not begin with `/`. Mounting at `/` returns the
/// downstream unchanged.
pub fn mount(prefix: &str, target: impl Into<Target>) -> Result<BoxedMiddleware, MountError> {
    if !prefix.starts_with('/') {
        return Err(MountError::InvalidPrefix(prefix.to_string()));
    }

    let target = target.into();
    let name = target.name();
    let downstream = target.into_downstream();

    if prefix == "/" {
        return Ok(downstream);
    }

    debug!(prefix = %prefix, name = %name, "mount");

    Ok(Arc::new(Mount {
        matcher: PrefixMatcher::new(prefix),
        downstream,
        name,
    }))
}

/// Mount `target` at `/`, i.e. resolve it into a plain middleware.
pub fn mount_root(target: impl Into<Target>) -> BoxedMiddleware {
    target.into().into_downstream()
}

impl Middleware for Mount {
    fn call<'a>(&'a self, ctx: &'a mut Context, next: Next<'a>) -> BoxFuture<'a, HandlerResult> {
        Box::pin(async move {
            let outside = ctx.location();
            let prefix = self.matcher.prefix();

            let Some(path) = self.matcher.strip(&outside.path) else {
                debug!(prefix = %prefix, name = %self.name, path = %outside.path, "mount skipped");
                metrics::record_mount(prefix, false);
                return next.run(ctx).await;
            };
            metrics::record_mount(prefix, true);

            let inside = Location {
                path,
                mount_path: Some(prefix.to_string()),
            };
            debug!(from = %outside.path, to = %inside.path, name = %self.name, "enter");

            let mut guard = LocationGuard::enter(ctx, inside.clone(), outside.clone());
            let upstream = Next::escape(outside, inside, next);
            let result = self.downstream.call(&mut *guard, upstream).await;
            drop(guard);

            debug!(path = %ctx.path(), name = %self.name, "leave");
            result
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Mount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mount")
            .field("prefix", &self.matcher.prefix())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
