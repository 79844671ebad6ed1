//! Ordered composition of middleware.

use std::fmt;

use crate::pipeline::middleware::{BoxFuture, BoxedMiddleware, HandlerResult, Middleware};
use crate::pipeline::{Context, Next};

/// A list of middleware run first-to-last as a single stage.
///
/// When the last stage runs its `next`, control continues with whatever
/// followed the composition in the enclosing pipeline.
#[derive(Clone, Default)]
pub struct Compose {
    stack: Vec<BoxedMiddleware>,
    name: Option<String>,
}

impl Compose {
    pub fn new(stack: Vec<BoxedMiddleware>) -> Self {
        Self { stack, name: None }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl Middleware for Compose {
    fn call<'a>(&'a self, ctx: &'a mut Context, next: Next<'a>) -> BoxFuture<'a, HandlerResult> {
        Next::stack(&self.stack, next).run(ctx)
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

impl fmt::Debug for Compose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::pipeline::from_fn;
    use axum::http::StatusCode;
    use std::sync::{Arc, Mutex};

    fn push(log: &Arc<Mutex<Vec<u8>>>, n: u8) -> BoxedMiddleware {
        let log = Arc::clone(log);
        Arc::new(from_fn(move |ctx, next| {
            log.lock().unwrap().push(n);
            next.run(ctx)
        }))
    }

    #[tokio::test]
    async fn test_runs_in_declaration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let composed = Compose::new(vec![push(&log, 1), push(&log, 2), push(&log, 3)]);
        assert_eq!(composed.len(), 3);

        let mut ctx = Context::get("/").unwrap();
        composed.call(&mut ctx, Next::end()).await.unwrap();

        assert_eq!(*log.lock().unwrap(), [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_continues_with_enclosing_next() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let composed: BoxedMiddleware = Arc::new(Compose::new(vec![push(&log, 1)]));
        let outer = vec![composed, push(&log, 2)];

        let mut ctx = Context::get("/").unwrap();
        Next::stack(&outer, Next::end()).run(&mut ctx).await.unwrap();

        assert_eq!(*log.lock().unwrap(), [1, 2]);
    }

    #[tokio::test]
    async fn test_empty_is_transparent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let empty = Compose::default();
        assert!(empty.is_empty());
        let composed: BoxedMiddleware = Arc::new(empty);
        let outer = vec![composed, push(&log, 7)];

        let mut ctx = Context::get("/").unwrap();
        Next::stack(&outer, Next::end()).run(&mut ctx).await.unwrap();

        assert_eq!(*log.lock().unwrap(), [7]);
    }

    #[tokio::test]
    async fn test_error_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let fail: BoxedMiddleware = Arc::new(from_fn(|_ctx, _next| {
            Box::pin(async { Err(HandlerError::status(StatusCode::IM_A_TEAPOT)) })
        }));
        let composed = Compose::new(vec![fail, push(&log, 1)]);

        let mut ctx = Context::get("/").unwrap();
        let err = composed.call(&mut ctx, Next::end()).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::IM_A_TEAPOT);
        assert!(log.lock().unwrap().is_empty());
    }
}
