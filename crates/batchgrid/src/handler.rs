//! The injected single-operation handler seam.

use std::future::Future;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::request::OperationRequest;
use crate::sink::ResponseSink;

/// The single-operation handler the batch adapter fans out to.
///
/// The adapter treats the handler as a black box: it never inspects the
/// handler's behavior beyond what the handler writes to the sink. For a
/// single operation the sink is the caller's real response; for a
/// batched operation it is a per-operation [`ResponseRecorder`].
///
/// [`ResponseRecorder`]: crate::ResponseRecorder
#[async_trait]
pub trait OperationHandler: Send + Sync {
    async fn handle(&self, sink: &mut dyn ResponseSink, request: OperationRequest);
}

/// Adapt a plain async function into an [`OperationHandler`].
///
/// The function receives the request and returns the complete response
/// as a `(status, headers, body)` triple; the adapter writes it to the
/// sink. Handy for tests and for handlers that never stream.
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(OperationRequest) -> Fut + Send + Sync,
    Fut: Future<Output = (StatusCode, HeaderMap, Bytes)> + Send,
{
    HandlerFn { f }
}

/// See [`handler_fn`].
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> OperationHandler for HandlerFn<F>
where
    F: Fn(OperationRequest) -> Fut + Send + Sync,
    Fut: Future<Output = (StatusCode, HeaderMap, Bytes)> + Send,
{
    async fn handle(&self, sink: &mut dyn ResponseSink, request: OperationRequest) {
        let (status, headers, body) = (self.f)(request).await;
        sink.set_status(status);
        sink.headers_mut().extend(headers);
        sink.append_body(&body);
    }
}
