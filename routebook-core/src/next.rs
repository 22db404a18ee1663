//! # Continuations and chain composition
//!
//! A matched route becomes a [`Chain`]: an immutable, ordered list of
//! middleware. Running it builds the continuation for index `0`; invoking the
//! continuation for index `i` calls `chain[i]` with the continuation for
//! `i + 1`, and the continuation past the last element is the terminal the
//! caller supplied.
//!
//! ```text
//! run(ctx, terminal)
//!   -> chain[0](ctx, next@1)
//!        -> chain[1](ctx, next@2)
//!             -> ...
//!                  -> terminal(ctx)
//! ```
//!
//! Nothing here catches errors: whatever a middleware returns travels back
//! through every `next.run(ctx).await` above it unchanged.

use crate::{
    context::RequestContext,
    error::BoxError,
    middleware::{BoxFuture, DynMiddleware, SharedMiddleware},
};
use std::{fmt, future};

/// The "proceed" continuation handed to every middleware.
///
/// `run` consumes the continuation, so calling it twice by accident does not
/// compile. A middleware that really wants to replay the downstream chain can
/// `clone()` it first and run each copy once.
pub struct Next<'a, C> {
    chain: &'a [SharedMiddleware<C>],
    index: usize,
    terminal: Terminal<'a, C>,
}

enum Terminal<'a, C> {
    /// Nothing after the chain.
    End,
    /// A host endpoint, invoked like any middleware with an empty `next`.
    Endpoint(&'a dyn DynMiddleware<C>),
    /// The continuation of an enclosing chain.
    Outer(Box<Next<'a, C>>),
}

impl<'a, C> Next<'a, C> {
    /// A continuation that does nothing and returns `Ok(())`.
    pub fn end() -> Self {
        Next {
            chain: &[],
            index: 0,
            terminal: Terminal::End,
        }
    }

    /// A continuation that invokes `endpoint` with an empty `next`.
    pub fn endpoint(endpoint: &'a dyn DynMiddleware<C>) -> Self {
        Next {
            chain: &[],
            index: 0,
            terminal: Terminal::Endpoint(endpoint),
        }
    }

    /// Number of chain members still ahead of this continuation, not counting
    /// the terminal.
    pub fn remaining(&self) -> usize {
        self.chain.len().saturating_sub(self.index)
    }

    /// Whether invoking this continuation reaches nothing at all.
    pub fn is_end(&self) -> bool {
        self.remaining() == 0
            && match &self.terminal {
                Terminal::End => true,
                Terminal::Endpoint(_) => false,
                Terminal::Outer(next) => next.is_end(),
            }
    }

    fn into_terminal(self) -> Terminal<'a, C> {
        if self.remaining() > 0 {
            return Terminal::Outer(Box::new(self));
        }
        self.terminal
    }
}

impl<'a, C: RequestContext> Next<'a, C> {
    /// Invoke the rest of the chain.
    pub fn run(self, ctx: &'a mut C) -> BoxFuture<'a, Result<(), BoxError>> {
        let Next {
            chain,
            index,
            terminal,
        } = self;

        match chain.get(index) {
            Some(middleware) => middleware.handle_dyn(
                ctx,
                Next {
                    chain,
                    index: index + 1,
                    terminal,
                },
            ),
            None => match terminal {
                Terminal::End => Box::pin(future::ready(Ok(()))),
                Terminal::Endpoint(endpoint) => endpoint.handle_dyn(ctx, Next::end()),
                Terminal::Outer(next) => next.run(ctx),
            },
        }
    }
}

impl<C> Clone for Next<'_, C> {
    fn clone(&self) -> Self {
        Next {
            chain: self.chain,
            index: self.index,
            terminal: match &self.terminal {
                Terminal::End => Terminal::End,
                Terminal::Endpoint(endpoint) => Terminal::Endpoint(*endpoint),
                Terminal::Outer(next) => Terminal::Outer(next.clone()),
            },
        }
    }
}

impl<C> fmt::Debug for Next<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("index", &self.index)
            .field("remaining", &self.remaining())
            .finish_non_exhaustive()
    }
}

/// An immutable, ordered middleware chain.
pub struct Chain<C> {
    middleware: Vec<SharedMiddleware<C>>,
}

/// Compose middleware into a [`Chain`], preserving iteration order.
pub fn compose<C, I>(middleware: I) -> Chain<C>
where
    I: IntoIterator<Item = SharedMiddleware<C>>,
{
    Chain {
        middleware: middleware.into_iter().collect(),
    }
}

impl<C> Chain<C> {
    /// Number of middleware in the chain.
    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    /// Whether the chain holds no middleware.
    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }
}

impl<C: RequestContext> Chain<C> {
    /// Run the chain, calling `terminal` once the last middleware proceeds.
    ///
    /// An empty chain goes straight to `terminal`.
    pub fn run<'a>(
        &'a self,
        ctx: &'a mut C,
        terminal: Next<'a, C>,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Next {
            chain: &self.middleware,
            index: 0,
            terminal: terminal.into_terminal(),
        }
        .run(ctx)
    }
}

impl<C> Clone for Chain<C> {
    fn clone(&self) -> Self {
        Chain {
            middleware: self.middleware.clone(),
        }
    }
}

impl<C> Default for Chain<C> {
    fn default() -> Self {
        Chain {
            middleware: Vec::new(),
        }
    }
}

impl<C> fmt::Debug for Chain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.len()).finish()
    }
}
