//! Handler chains with next-in-chain continuation.
//!
//! A route owns an ordered chain of steps. Each step receives the request
//! and a [`Next`] continuation over the remaining steps, so middleware-like
//! steps wrap the rest of the chain while a terminal step simply never
//! invokes its continuation.
//!
//! ```rust,ignore
//! resource.get("1.0", (
//!     |mut req: Request, next: Next| async move {
//!         req.extensions_mut().insert(RequestTag::new());
//!         next.run(req).await
//!     },
//!     |_req: Request, _next: Next| async move { "list" },
//! ))?;
//! ```

use crate::request::Request;
use crate::response::{IntoResponse, Response};
use http::StatusCode;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future every handler resolves to.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// One step of a route's handler chain.
///
/// Implemented for any `Fn(Request, Next) -> impl Future` whose output
/// converts via [`IntoResponse`], so plain closures and async fns are
/// handlers without ceremony.
pub trait Handler: Send + Sync + 'static {
    /// Handle the request, or delegate through `next`.
    fn call(&self, req: Request, next: Next) -> HandlerFuture;
}

impl<F, Fut, Res> Handler for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Res> + Send + 'static,
    Res: IntoResponse + 'static,
{
    fn call(&self, req: Request, next: Next) -> HandlerFuture {
        let fut = self(req, next);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Shared, immutable handler chain attached to one route.
pub type HandlerChain = Arc<[Arc<dyn Handler>]>;

/// Continuation over the remaining steps of a chain.
///
/// Running past the end of the chain yields an empty 404; terminal
/// handlers just don't call it.
pub struct Next {
    chain: HandlerChain,
    index: usize,
}

impl Next {
    /// Continuation starting at the first step of `chain`. This is how a
    /// host runs a mounted handler list.
    pub fn new(chain: HandlerChain) -> Self {
        Self { chain, index: 0 }
    }

    /// Hand the request to the next step in the chain.
    pub fn run(self, req: Request) -> HandlerFuture {
        match self.chain.get(self.index).cloned() {
            Some(step) => {
                let next = Next {
                    chain: self.chain,
                    index: self.index + 1,
                };
                step.call(req, next)
            }
            None => Box::pin(async { StatusCode::NOT_FOUND.into_response() }),
        }
    }
}

/// Conversion into a handler chain.
///
/// Implemented for a single handler, for tuples of up to four handlers
/// (run in order), and for pre-boxed vectors. The `M` marker parameter
/// only disambiguates the impls; call sites never name it.
pub trait IntoHandlerChain<M> {
    /// Build the ordered chain.
    fn into_chain(self) -> HandlerChain;
}

impl<H: Handler> IntoHandlerChain<(H,)> for H {
    fn into_chain(self) -> HandlerChain {
        Arc::from(vec![Arc::new(self) as Arc<dyn Handler>])
    }
}

impl<H1: Handler, H2: Handler> IntoHandlerChain<(H1, H2)> for (H1, H2) {
    fn into_chain(self) -> HandlerChain {
        Arc::from(vec![
            Arc::new(self.0) as Arc<dyn Handler>,
            Arc::new(self.1) as Arc<dyn Handler>,
        ])
    }
}

impl<H1: Handler, H2: Handler, H3: Handler> IntoHandlerChain<(H1, H2, H3)> for (H1, H2, H3) {
    fn into_chain(self) -> HandlerChain {
        Arc::from(vec![
            Arc::new(self.0) as Arc<dyn Handler>,
            Arc::new(self.1) as Arc<dyn Handler>,
            Arc::new(self.2) as Arc<dyn Handler>,
        ])
    }
}

impl<H1: Handler, H2: Handler, H3: Handler, H4: Handler> IntoHandlerChain<(H1, H2, H3, H4)>
    for (H1, H2, H3, H4)
{
    fn into_chain(self) -> HandlerChain {
        Arc::from(vec![
            Arc::new(self.0) as Arc<dyn Handler>,
            Arc::new(self.1) as Arc<dyn Handler>,
            Arc::new(self.2) as Arc<dyn Handler>,
            Arc::new(self.3) as Arc<dyn Handler>,
        ])
    }
}

impl IntoHandlerChain<()> for Vec<Arc<dyn Handler>> {
    fn into_chain(self) -> HandlerChain {
        Arc::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, Method, Uri};

    fn request() -> Request {
        Request::new(Method::GET, Uri::from_static("/"))
    }

    fn chain<M>(handlers: impl IntoHandlerChain<M>) -> HandlerChain {
        handlers.into_chain()
    }

    #[tokio::test]
    async fn single_handler_answers() {
        let chain = chain(|_req: Request, _next: Next| async move { "ok" });

        let res = Next::new(chain).run(request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn steps_run_in_order() {
        let chain = chain((
            |req: Request, next: Next| async move {
                let mut res = next.run(req).await;
                res.headers_mut()
                    .insert("x-outer", HeaderValue::from_static("1"));
                res
            },
            |req: Request, next: Next| async move {
                let mut res = next.run(req).await;
                res.headers_mut()
                    .insert("x-inner", HeaderValue::from_static("2"));
                res
            },
            |_req: Request, _next: Next| async move { StatusCode::NO_CONTENT },
        ));

        let res = Next::new(chain).run(request()).await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(res.headers().get("x-outer").unwrap(), "1");
        assert_eq!(res.headers().get("x-inner").unwrap(), "2");
    }

    #[tokio::test]
    async fn exhausted_chain_is_not_found() {
        let chain =
            chain(|req: Request, next: Next| async move { next.run(req).await });

        let res = Next::new(chain).run(request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn middleware_can_short_circuit() {
        let chain = chain((
            |_req: Request, _next: Next| async move { StatusCode::FORBIDDEN },
            |_req: Request, _next: Next| async move { "never reached" },
        ));

        let res = Next::new(chain).run(request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
