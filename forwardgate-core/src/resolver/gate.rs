use crate::ctx::RequestCtx;
use crate::resolver::TrustResolver;
use std::sync::Arc;

/// Request handler the trust gate can sit in front of.
pub trait Handler: Send + Sync {
    type Output;

    fn handle(&self, ctx: &mut RequestCtx) -> Self::Output;
}

/// Adapts a closure into a [`Handler`].
pub struct HandlerFn<F> {
    f: F,
}

pub fn handler_fn<F, O>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut RequestCtx) -> O + Send + Sync,
{
    HandlerFn { f }
}

impl<F, O> Handler for HandlerFn<F>
where
    F: Fn(&mut RequestCtx) -> O + Send + Sync,
{
    type Output = O;

    fn handle(&self, ctx: &mut RequestCtx) -> O {
        (self.f)(ctx)
    }
}

/// Rewrites the peer address and secure flag of requests coming from trusted
/// peers, then always hands the request to the wrapped handler.
pub struct TrustGate<H> {
    resolver: Arc<TrustResolver>,
    inner: H,
}

impl<H> TrustGate<H> {
    pub fn new(resolver: Arc<TrustResolver>, inner: H) -> Self {
        Self { resolver, inner }
    }

    pub fn resolver(&self) -> &TrustResolver {
        &self.resolver
    }
}

impl<H: Handler> Handler for TrustGate<H> {
    type Output = H::Output;

    fn handle(&self, ctx: &mut RequestCtx) -> H::Output {
        let state = self.resolver.evaluate(&ctx.headers, ctx.peer_state());
        ctx.apply(state);
        self.inner.handle(ctx)
    }
}
