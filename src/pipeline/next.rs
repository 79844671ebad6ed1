//! The continuation handed to every middleware.

use std::fmt;

use crate::pipeline::context::{Location, LocationGuard};
use crate::pipeline::middleware::{BoxFuture, BoxedMiddleware, HandlerResult};
use crate::pipeline::Context;

/// Everything that runs after the current stage.
///
/// Consumed by [`Next::run`], so a stage can resume the pipeline at most
/// once. Dropping it without running short-circuits the rest.
pub struct Next<'a> {
    link: Link<'a>,
}

enum Link<'a> {
    /// Nothing left; the outermost pipeline has finished.
    End,
    /// Remaining stages of a stack, then whatever encloses it.
    Stack {
        stack: &'a [BoxedMiddleware],
        then: Box<Next<'a>>,
    },
    /// Leave a mount: run `upstream` at `outside`, then return to `inside`.
    Escape {
        outside: Location,
        inside: Location,
        upstream: Box<Next<'a>>,
    },
}

impl<'a> Next<'a> {
    /// The end of the pipeline.
    pub fn end() -> Self {
        Self { link: Link::End }
    }

    /// Run `stack` in order, then continue with `then`.
    pub fn stack(stack: &'a [BoxedMiddleware], then: Next<'a>) -> Self {
        Self {
            link: Link::Stack {
                stack,
                then: Box::new(then),
            },
        }
    }

    /// Continuation passed into a mounted downstream. Running it switches
    /// the context back to `outside` for the duration of `upstream`.
    pub(crate) fn escape(outside: Location, inside: Location, upstream: Next<'a>) -> Self {
        Self {
            link: Link::Escape {
                outside,
                inside,
                upstream: Box::new(upstream),
            },
        }
    }

    /// Resume the pipeline and wait for everything downstream to finish.
    pub fn run<'c>(self, ctx: &'c mut Context) -> BoxFuture<'c, HandlerResult>
    where
        'a: 'c,
    {
        Box::pin(async move {
            match self.link {
                Link::End => Ok(()),
                Link::Stack { stack, then } => match stack.split_first() {
                    Some((head, rest)) => head.call(ctx, Next::stack(rest, *then)).await,
                    None => then.run(ctx).await,
                },
                Link::Escape {
                    outside,
                    inside,
                    upstream,
                } => {
                    let mut guard = LocationGuard::enter(ctx, outside, inside);
                    let result = upstream.run(&mut *guard).await;
                    drop(guard);
                    result
                }
            }
        })
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.link {
            Link::End => f.write_str("Next::End"),
            Link::Stack { stack, .. } => f
                .debug_struct("Next::Stack")
                .field("remaining", &stack.len())
                .finish_non_exhaustive(),
            Link::Escape { outside, inside, .. } => f
                .debug_struct("Next::Escape")
                .field("outside", outside)
                .field("inside", inside)
                .finish_non_exhaustive(),
        }
    }
}
