//! Path-prefix mounting for a continuation-passing middleware pipeline.
//!
//! `mount(prefix, target)` returns a middleware that runs `target` only for
//! requests under `prefix`, showing it the path relative to the prefix and
//! restoring the original path afterwards.

pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod routing;

pub use app::App;
pub use error::{HandlerError, MountError};
pub use http::HttpServer;
pub use pipeline::{from_fn, BoxedMiddleware, Context, Middleware, Next};
pub use routing::{mount, mount_root, Target};
