//! Request pipeline.
//!
//! # Data Flow
//! ```text
//! Request head
//!     → context.rs (Context: path, mount_path, response fields)
//!     → next.rs (Next: run remaining stages in order)
//!     → middleware.rs (each stage: work in, next.run, work out)
//!     → compose.rs (a list of stages behaving as one)
//! ```
//!
//! # Design Decisions
//! - Continuation passing: a stage awaits `next` and resumes afterwards
//! - The context is lent as `&mut Context`, never shared
//! - Stages are immutable and shared via `Arc` across requests

pub mod compose;
pub mod context;
pub mod middleware;
pub mod next;

pub use compose::Compose;
pub use context::Context;
pub use middleware::{from_fn, BoxFuture, BoxedMiddleware, FnMiddleware, HandlerResult, Middleware};
pub use next::Next;
